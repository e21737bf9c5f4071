/*
This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
If a copy of the MPL was not distributed with this file,
You can obtain one at https://mozilla.org/MPL/2.0/.
*/

pub mod action_runtime;
pub mod action_state;
pub mod actions;
pub mod collectors;
pub mod considerations;
pub mod context;
pub mod controller;
pub mod curves;
pub mod decision;
pub mod entity;
pub mod errors;
pub mod evaluator;
pub mod identifiers;
pub mod registry;
pub mod trace;
pub mod types;
