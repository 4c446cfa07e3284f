//! The text protocol used to play a game from a terminal or a pipe
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////

pub mod text;
pub mod session;

pub use text::{Command, Response, ParseCommandError};
pub use session::Session;
