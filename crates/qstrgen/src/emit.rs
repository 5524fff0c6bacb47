use crate::{
    hash::compute_hash,
    parse::{ConfigMap, Qstr},
};

// ---------------------------------------------------------------------------
// EmitError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    #[error("missing required config value: {key}")]
    MissingConfig { key: &'static str },
    #[error("invalid config value for {key}: {value}")]
    BadConfigValue { key: &'static str, value: String },
    #[error("qstr is too long: {qstr}")]
    QstrTooLong { qstr: String },
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Byte widths of the fixed-size length and hash fields that prefix each
/// entry's payload in the generated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub bytes_in_len: u32,
    pub bytes_in_hash: u32,
}

impl Config {
    pub fn from_map(cfg: &ConfigMap) -> Result<Self, EmitError> {
        Ok(Self {
            bytes_in_len: Self::width(cfg, "BYTES_IN_LEN")?,
            bytes_in_hash: Self::width(cfg, "BYTES_IN_HASH")?,
        })
    }

    // The hash accumulator is 64 bits, so field widths past 8 bytes
    // cannot be honored bit-for-bit and are rejected up front.
    fn width(cfg: &ConfigMap, key: &'static str) -> Result<u32, EmitError> {
        let value = cfg.get(key).ok_or(EmitError::MissingConfig { key })?;
        match value.parse() {
            Ok(w) if w <= 8 => Ok(w),
            _ => Err(EmitError::BadConfigValue {
                key,
                value: value.clone(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry encoding
// ---------------------------------------------------------------------------

/// Renders `width` little-endian bytes of `value` as `\xNN` escapes.
fn escape_bytes(value: u64, width: u32) -> String {
    (0..width)
        .map(|i| format!("\\x{:02x}", (value >> (8 * i)) & 0xff))
        .collect()
}

/// Encodes one qstr as its table expression: hash bytes, then length
/// bytes, then the payload, so the runtime reads a fixed-width binary
/// prefix immediately followed by the string data.
///
/// All-printable-ASCII content (without backslashes) is kept verbatim for
/// easier debugging of the generated file; anything else is rendered as
/// the fully escaped UTF-8 byte sequence, with the length counted in
/// bytes rather than characters.
pub fn encode_qstr(cfg: Config, qstr: &str) -> Result<String, EmitError> {
    let qhash = compute_hash(qstr, cfg.bytes_in_hash);
    let printable = qstr
        .chars()
        .all(|c| (c == ' ' || c.is_ascii_graphic()) && c != '\\');
    let (qlen, qdata) = if printable {
        (qstr.len() as u64, qstr.to_string())
    } else {
        let bytes = qstr.as_bytes();
        let escaped = bytes.iter().map(|b| format!("\\x{b:02x}")).collect();
        (bytes.len() as u64, escaped)
    };
    if cfg.bytes_in_len < 8 && qlen >= 1u64 << (8 * cfg.bytes_in_len) {
        return Err(EmitError::QstrTooLong {
            qstr: qstr.to_string(),
        });
    }
    Ok(format!(
        "(const byte*)\"{}{}\" \"{}\"",
        escape_bytes(qhash, cfg.bytes_in_hash),
        escape_bytes(qlen, cfg.bytes_in_len),
        qdata
    ))
}

// ---------------------------------------------------------------------------
// TableEmitter
// ---------------------------------------------------------------------------

/// Renders the full qstr data table: a provenance comment, the reserved
/// index-0 sentinel with an all-zero prefix, then one `QDEF` line per
/// declared qstr in first-seen order.
pub struct TableEmitter<'a> {
    output: String,
    cfg: Config,
    qstrs: &'a [Qstr],
}

impl<'a> TableEmitter<'a> {
    pub fn new(cfg: Config, qstrs: &'a [Qstr]) -> Self {
        Self {
            cfg,
            qstrs,
            output: String::with_capacity(1024),
        }
    }

    pub fn emit(mut self) -> Result<String, EmitError> {
        self.writeln("// This file was automatically generated by qstrgen");
        self.writeln("");

        // Index 0 means "no string": zero hash, zero length, no data.
        let zeros = escape_bytes(0, self.cfg.bytes_in_hash + self.cfg.bytes_in_len);
        self.writeln(&format!("QDEF(MP_QSTR_NULL, (const byte*)\"{zeros}\" \"\")"));

        for q in self.qstrs {
            let bytes = encode_qstr(self.cfg, &q.qstr)?;
            self.writeln(&format!("QDEF(MP_QSTR_{}, {})", q.ident, bytes));
        }
        Ok(self.output)
    }

    fn writeln(&mut self, s: &str) {
        self.output.push_str(s);
        self.output.push('\n');
    }
}
