/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! File-format backends for loading authored DecisionPackage data.
//!
//! Each supported format lives behind its own feature flag (`json_support`,
//! `ron_support`, `toml_support`) so games only compile the parsers they
//! actually ship with. All backends produce the same `DecisionPackageData`;
//! resolving it against registries stays a `medulla-core` concern.

pub mod loader;

pub use loader::*;
