//! Backend endpoint paths
//!
//! Segments carrying user-chosen keys are percent-encoded with the same
//! reserved set as JavaScript's `encodeURIComponent`.

use cexdeck_core::types::ModuleCode;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const CONNECT: &str = "/api/connect";
pub const TEMPLATES: &str = "/api/templates";
pub const PLUGIN_TEMPLATES: &str = "/api/templates/plugins";
pub const TENANT_TEMPLATES: &str = "/api/tenant-templates";
pub const CREDENTIALS: &str = "/api/credentials";

pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, COMPONENT).to_string()
}

pub fn plugin_template(module: ModuleCode, plugin_name: &str) -> String {
    format!(
        "{PLUGIN_TEMPLATES}/{}/{}",
        module.code(),
        encode_segment(plugin_name)
    )
}

pub fn tenant_template(key: &str) -> String {
    format!("{TENANT_TEMPLATES}/{}", encode_segment(key))
}

pub fn credential(key: &str) -> String {
    format!("{CREDENTIALS}/{}", encode_segment(key))
}

pub fn plugin_config(connection_id: &str) -> String {
    format!("/api/plugins/{}", encode_segment(connection_id))
}
