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

use crate::error::Result;
use crate::paths::{list_readable_files, vintf};
use crate::version::{VndkVersion, parse_version};
use regex::Regex;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static INIT_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\Winit_([0-9]+)_([0-9]+)\W").expect("valid regex"));

const CIL_EXTENSION: &str = "cil";

/// Platform SEPolicy version the vendor policy was built against.
///
/// `plat_sepolicy_vers.txt` is authoritative when present, even if its first
/// line does not parse. Otherwise every readable `.cil` file in the vendor
/// SELinux directory is searched for `init_<major>_<minor>` attributes and
/// the highest one wins.
pub fn scan_selinux(root: &Path) -> Result<Option<VndkVersion>> {
    let version_file = vintf::plat_sepolicy_version_file(root);
    if version_file.exists() {
        let version = read_version_file(&version_file)?;
        log::debug!("{}: {version:?}", version_file.display());
        return Ok(version);
    }

    let selinux_dir = vintf::vendor_selinux_dir(root);
    let Some(files) = list_readable_files(&selinux_dir) else {
        log::debug!("No SELinux policy directory at {}", selinux_dir.display());
        return Ok(None);
    };

    let cil_files: Vec<PathBuf> = files
        .into_iter()
        .filter(|path| path.extension().is_some_and(|ext| ext == CIL_EXTENSION))
        .collect();

    let mut best = None;
    for file in &cil_files {
        let contents = fs::read(file)?;
        let found = scan_cil(&String::from_utf8_lossy(&contents));
        log::trace!("{}: {found:?}", file.display());
        best = best.max(found);
    }
    Ok(best)
}

fn read_version_file(path: &Path) -> Result<Option<VndkVersion>> {
    let mut first_line = String::new();
    BufReader::new(File::open(path)?).read_line(&mut first_line)?;
    Ok(parse_version(&first_line))
}

/// Highest `init_<major>_<minor>` token in a CIL policy source.
fn scan_cil(contents: &str) -> Option<VndkVersion> {
    contents
        .lines()
        .flat_map(|line| INIT_VERSION.captures_iter(line))
        .filter_map(|captures| {
            let major = captures[1].parse().ok()?;
            let minor = captures[2].parse().ok()?;
            Some(VndkVersion::new(major, minor))
        })
        .max()
}
