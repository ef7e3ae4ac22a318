//! Stage diagnostics on stderr, controlled by `QR_DEBUG`.
//!
//! `QR_DEBUG=encode` or `QR_DEBUG=decode` limits output to one pipeline;
//! any other non-empty value enables both. Unset (or `0`) disables.

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebugScope {
    Off,
    Encode,
    Decode,
    All,
}

static DEBUG_SCOPE: OnceLock<DebugScope> = OnceLock::new();

fn scope() -> DebugScope {
    *DEBUG_SCOPE.get_or_init(|| match std::env::var("QR_DEBUG").as_deref() {
        Err(_) | Ok("") | Ok("0") => DebugScope::Off,
        Ok("encode") => DebugScope::Encode,
        Ok("decode") => DebugScope::Decode,
        Ok(_) => DebugScope::All,
    })
}

pub(crate) fn encode_debug_enabled() -> bool {
    matches!(scope(), DebugScope::Encode | DebugScope::All)
}

pub(crate) fn decode_debug_enabled() -> bool {
    matches!(scope(), DebugScope::Decode | DebugScope::All)
}
