// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Owner and identifier naming.
//!
//! Functions are emitted into per-source-file owners under a package
//! path: `org/module/major/file`. A callee that has not been compiled yet
//! is addressed by recomputing that path from its symbol.

use tern_types::PackageId;

use crate::LoweringConfig;

/// Characters the backend does not accept inside member names.
const RESERVED_CHARS: &[char] = &['\\', '.', ':', ';', '[', ']', '/', '<', '>'];

/// Package path prefix, with a trailing `/` after each present component.
///
/// The anonymous org, the root module and an empty version are omitted.
pub fn package_name(config: &LoweringConfig, org: &str, module: &str, version: &str) -> String {
    let mut name = String::new();
    if org != config.anonymous_org {
        name.push_str(&cleanup_name(org));
        name.push('/');
    }
    if module != config.root_module {
        name.push_str(&cleanup_name(module));
        name.push('/');
    }
    if !version.is_empty() {
        name.push_str(major_version(version));
        name.push('/');
    }
    name
}

fn cleanup_name(name: &str) -> String {
    name.replace('.', "_")
}

fn major_version(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}

/// Encode a source identifier as a backend member name.
///
/// Quoted identifiers lose their leading quote; reserved characters become
/// `$` followed by their four-digit decimal code point.
pub fn encode_identifier(name: &str) -> String {
    let name = name.strip_prefix('\'').unwrap_or(name);
    let mut encoded = String::with_capacity(name.len());
    for c in name.chars() {
        if RESERVED_CHARS.contains(&c) {
            encoded.push_str(&format!("${:04}", c as u32));
        } else {
            encoded.push(c);
        }
    }
    encoded
}

/// Sanitize a generated thunk name.
pub fn cleanup_function_name(name: &str) -> String {
    name.chars()
        .map(|c| if matches!(c, '.' | ':' | '/' | '<' | '>') { '_' } else { c })
        .collect()
}

/// Normalize Windows separators in a source path.
pub fn cleanup_path_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Method name sent to the dispatch entry point: `Type.method` → `method`.
pub fn virtual_method_name(name: &str) -> &str {
    let method = name.rsplit('.').next().unwrap_or(name);
    method.strip_prefix('\'').unwrap_or(method)
}

/// How to name the owner of a function that has no compiled entry point.
pub trait ModuleNamingPolicy {
    fn module_owner(&self, pkg: &PackageId, source: Option<&str>) -> String;
}

/// One owner per source file; the module-initializer owner when the file
/// is unknown or not a Tern source.
#[derive(Debug, Clone)]
pub struct SourceFileNaming {
    config: LoweringConfig,
}

impl SourceFileNaming {
    pub fn new(config: &LoweringConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl ModuleNamingPolicy for SourceFileNaming {
    fn module_owner(&self, pkg: &PackageId, source: Option<&str>) -> String {
        let ext = self.config.source_extension.as_str();
        let file = match source {
            Some(file) if file.ends_with(ext) => {
                cleanup_name(&cleanup_path_separators(&file[..file.len() - ext.len()]))
            }
            _ => self.config.module_init_name.clone(),
        };
        format!(
            "{}{}",
            package_name(&self.config, &pkg.org, &pkg.name, &pkg.version),
            file
        )
    }
}
