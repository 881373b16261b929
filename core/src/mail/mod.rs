/*
 * mod.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Mail Trail, a mail interception and audit library.
 *
 * Mail Trail is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Mail Trail is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Mail Trail.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Permissive mail parsing: address lists and raw header blobs.

pub mod address;
pub mod headers;

pub use address::{parse_address, parse_address_list, parse_address_slice, Address};
pub use headers::{parse_header_lines, parse_header_map, parse_header_slice, HeaderSet};

/// Normalize CRLF line endings to LF before splitting on newline.
pub(crate) fn normalize_newlines(raw: &str) -> String {
    raw.replace("\r\n", "\n")
}
