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

use crate::error::{Result, TrebleError};
use crate::version::{VndkVersion, parse_version};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::ControlFlow;
use std::path::Path;

const VENDOR_NDK_TAG: &[u8] = b"vendor-ndk";
const VERSION_TAG: &[u8] = b"version";
const SEPOLICY_TAG: &[u8] = b"sepolicy";

/// Receives the element and text events of one document.
trait TagScanner {
    fn start(&mut self, name: &[u8]);
    fn end(&mut self, name: &[u8]) -> ControlFlow<()>;
    fn text(&mut self, text: &str);
    fn finish(self) -> std::result::Result<Vec<String>, String>;
}

/// Collects every `<version>` inside `<vendor-ndk>` of a compatibility matrix.
#[derive(Default)]
struct MatrixScanner {
    versions: Vec<String>,
    current: String,
    in_vendor_ndk: bool,
    in_version: bool,
}

impl TagScanner for MatrixScanner {
    fn start(&mut self, name: &[u8]) {
        if name == VENDOR_NDK_TAG {
            self.in_vendor_ndk = true;
        } else if self.in_vendor_ndk && name == VERSION_TAG {
            self.in_version = true;
        }
    }

    fn end(&mut self, name: &[u8]) -> ControlFlow<()> {
        if self.in_version {
            self.in_version = false;
            self.versions.push(std::mem::take(&mut self.current));
        } else if self.in_vendor_ndk && name == VENDOR_NDK_TAG {
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }

    fn text(&mut self, text: &str) {
        if self.in_version {
            self.current.push_str(text.trim());
        }
    }

    fn finish(self) -> std::result::Result<Vec<String>, String> {
        Ok(self.versions)
    }
}

/// Collects the text of the first `<sepolicy>` element of a manifest.
#[derive(Default)]
struct ManifestScanner {
    version: String,
    in_sepolicy: bool,
}

impl TagScanner for ManifestScanner {
    fn start(&mut self, name: &[u8]) {
        if name == SEPOLICY_TAG {
            self.in_sepolicy = true;
        }
    }

    fn end(&mut self, _name: &[u8]) -> ControlFlow<()> {
        // <sepolicy><version>30.0</version></sepolicy> stops at </version>
        if self.in_sepolicy {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_sepolicy {
            self.version.push_str(text.trim());
        }
    }

    fn finish(self) -> std::result::Result<Vec<String>, String> {
        if self.version.is_empty() {
            return Err("no sepolicy version found".to_string());
        }
        Ok(vec![self.version])
    }
}

/// Highest `<vendor-ndk>` version declared by a compatibility matrix.
///
/// Returns `Ok(None)` when the file cannot be opened or no version parses.
pub fn scan_matrix(path: &Path) -> Result<Option<VndkVersion>> {
    scan_file(path, MatrixScanner::default())
}

/// SEPolicy version declared by a device manifest.
///
/// Returns `Ok(None)` when the file cannot be opened. A manifest without
/// any `<sepolicy>` text is an error.
pub fn scan_manifest(path: &Path) -> Result<Option<VndkVersion>> {
    scan_file(path, ManifestScanner::default())
}

fn scan_file<S: TagScanner>(path: &Path, scanner: S) -> Result<Option<VndkVersion>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            log::debug!("Cannot open {}: {e}", path.display());
            return Ok(None);
        }
    };

    let candidates = scan_reader(BufReader::new(file), scanner).map_err(|reason| {
        TrebleError::Xml {
            path: path.to_path_buf(),
            reason,
        }
    })?;
    log::trace!("{}: version candidates {candidates:?}", path.display());

    Ok(best_version(&candidates))
}

fn scan_reader<R: BufRead, S: TagScanner>(
    input: R,
    mut scanner: S,
) -> std::result::Result<Vec<String>, String> {
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(element)) => scanner.start(element.name().as_ref()),
            Ok(Event::End(element)) => {
                if scanner.end(element.name().as_ref()).is_break() {
                    break;
                }
            }
            Ok(Event::Text(text)) => {
                let text = text.unescape().map_err(|e| e.to_string())?;
                scanner.text(&text);
            }
            Ok(Event::CData(data)) => {
                scanner.text(&String::from_utf8_lossy(&data));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "error at position {}: {e}",
                    reader.buffer_position()
                ));
            }
        }
        buf.clear();
    }

    scanner.finish()
}

fn best_version(candidates: &[String]) -> Option<VndkVersion> {
    candidates
        .iter()
        .filter_map(|candidate| parse_version(candidate))
        .max()
}
