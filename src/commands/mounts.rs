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

use crate::detect::{Device, Mount};
use crate::error::Result;
use comfy_table::{Cell, Color, Table};

pub struct MountsCommand<'a> {
    device: &'a Device,
}

impl<'a> MountsCommand<'a> {
    pub fn new(device: &'a Device) -> Result<Self> {
        Ok(Self { device })
    }

    pub fn execute(&self) -> Result<()> {
        let mounts = self.device.detector().mounts()?;
        println!("{}", mounts_table(&mounts));
        Ok(())
    }
}

/// Render the mount table, highlighting the entries the system-as-root
/// check looks at.
pub fn mounts_table(mounts: &[Mount]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(vec![
        Cell::new("Device"),
        Cell::new("Mount point"),
        Cell::new("Type"),
        Cell::new("Options"),
        Cell::new("Dump"),
        Cell::new("Pass"),
    ]);

    for mount in mounts {
        let mountpoint = match mount.mountpoint.as_str() {
            "/" | "/system" | "/system_root" => Cell::new(&mount.mountpoint).fg(Color::Green),
            _ => Cell::new(&mount.mountpoint),
        };
        table.add_row(vec![
            Cell::new(&mount.device),
            mountpoint,
            Cell::new(&mount.fs_type),
            Cell::new(mount.flags.join(",")),
            Cell::new(mount.dump),
            Cell::new(mount.fsck_order),
        ]);
    }

    table
}
