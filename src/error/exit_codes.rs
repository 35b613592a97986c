// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::TrebleError;

pub fn get_exit_code(error: &TrebleError) -> i32 {
    match error {
        TrebleError::InvalidConfig(_) | TrebleError::ConfigError(_) => 2,

        TrebleError::MountsFormat { .. }
        | TrebleError::NoVersionSource { .. }
        | TrebleError::Xml { .. } => 3,

        TrebleError::PropertyUnavailable(_) => 4,

        TrebleError::MountsUnavailable { source, .. } if is_permission_denied(source) => 13,
        TrebleError::PropertyFile { source, .. } if is_permission_denied(source) => 13,
        TrebleError::Io(io_err) if is_permission_denied(io_err) => 13,

        _ => 1,
    }
}

fn is_permission_denied(error: &std::io::Error) -> bool {
    error.kind() == std::io::ErrorKind::PermissionDenied
}
