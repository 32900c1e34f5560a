// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! CBOR encoding of Plutus data.
//!
//! Follows the ledger's conventions so encodings match what wallet SDKs emit:
//! indefinite-length arrays for non-empty lists and constructor fields,
//! 64-byte chunking for long byte strings, compact constructor tags.

use super::data::PlutusData;
use crate::config::PLUTUS_BYTES_CHUNK;
use crate::error::{KernelError, Result};

const MAJOR_UNSIGNED: u8 = 0;
const MAJOR_NEGATIVE: u8 = 1;
const MAJOR_BYTES: u8 = 2;
const MAJOR_ARRAY: u8 = 4;
const MAJOR_MAP: u8 = 5;
const MAJOR_TAG: u8 = 6;

const INDEFINITE_BYTES: u8 = 0x5f;
const INDEFINITE_ARRAY: u8 = 0x9f;
const BREAK: u8 = 0xff;

const TAG_POS_BIGNUM: u64 = 2;
const TAG_NEG_BIGNUM: u64 = 3;
const TAG_CONSTR_GENERAL: u64 = 102;
const TAG_CONSTR_SMALL: u64 = 121;
const TAG_CONSTR_LARGE: u64 = 1280;

/// writes a major type header with its argument in the shortest form
fn write_header(buf: &mut Vec<u8>, major: u8, arg: u64) {
    let m = major << 5;
    if arg < 24 {
        buf.push(m | arg as u8);
    } else if arg <= u8::MAX as u64 {
        buf.push(m | 24);
        buf.push(arg as u8);
    } else if arg <= u16::MAX as u64 {
        buf.push(m | 25);
        buf.extend_from_slice(&(arg as u16).to_be_bytes());
    } else if arg <= u32::MAX as u64 {
        buf.push(m | 26);
        buf.extend_from_slice(&(arg as u32).to_be_bytes());
    } else {
        buf.push(m | 27);
        buf.extend_from_slice(&arg.to_be_bytes());
    }
}

fn write_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    if bytes.len() <= PLUTUS_BYTES_CHUNK {
        write_header(buf, MAJOR_BYTES, bytes.len() as u64);
        buf.extend_from_slice(bytes);
        return;
    }
    buf.push(INDEFINITE_BYTES);
    for chunk in bytes.chunks(PLUTUS_BYTES_CHUNK) {
        write_header(buf, MAJOR_BYTES, chunk.len() as u64);
        buf.extend_from_slice(chunk);
    }
    buf.push(BREAK);
}

/// big-endian magnitude without leading zeros
fn magnitude_bytes(n: u128) -> Vec<u8> {
    let raw = n.to_be_bytes();
    let first = raw.iter().position(|b| *b != 0).unwrap_or(raw.len() - 1);
    raw[first..].to_vec()
}

fn write_integer(buf: &mut Vec<u8>, value: i128) {
    if value >= 0 {
        let n = value as u128;
        if n <= u64::MAX as u128 {
            write_header(buf, MAJOR_UNSIGNED, n as u64);
        } else {
            write_header(buf, MAJOR_TAG, TAG_POS_BIGNUM);
            write_bytes(buf, &magnitude_bytes(n));
        }
    } else {
        // CBOR negatives carry -1 - n
        let n = (-(value + 1)) as u128;
        if n <= u64::MAX as u128 {
            write_header(buf, MAJOR_NEGATIVE, n as u64);
        } else {
            write_header(buf, MAJOR_TAG, TAG_NEG_BIGNUM);
            write_bytes(buf, &magnitude_bytes(n));
        }
    }
}

fn write_list(buf: &mut Vec<u8>, items: &[PlutusData]) -> Result<()> {
    if items.is_empty() {
        write_header(buf, MAJOR_ARRAY, 0);
        return Ok(());
    }
    buf.push(INDEFINITE_ARRAY);
    for item in items {
        write_data(buf, item)?;
    }
    buf.push(BREAK);
    Ok(())
}

fn write_data(buf: &mut Vec<u8>, data: &PlutusData) -> Result<()> {
    match data {
        PlutusData::Constr { alternative, fields } => {
            let alt = *alternative;
            if alt <= 6 {
                write_header(buf, MAJOR_TAG, TAG_CONSTR_SMALL + alt);
                write_list(buf, fields)?;
            } else if alt <= 127 {
                write_header(buf, MAJOR_TAG, TAG_CONSTR_LARGE + (alt - 7));
                write_list(buf, fields)?;
            } else {
                write_header(buf, MAJOR_TAG, TAG_CONSTR_GENERAL);
                write_header(buf, MAJOR_ARRAY, 2);
                write_header(buf, MAJOR_UNSIGNED, alt);
                write_list(buf, fields)?;
            }
        }
        PlutusData::Map { entries } => {
            write_header(buf, MAJOR_MAP, entries.len() as u64);
            for (k, v) in entries {
                write_data(buf, k)?;
                write_data(buf, v)?;
            }
        }
        PlutusData::List { items } => write_list(buf, items)?,
        PlutusData::Integer { value } => write_integer(buf, *value),
        PlutusData::Bytes { hex: h } => {
            let raw = hex::decode(h).map_err(|e| KernelError::InvalidHex(e.to_string()))?;
            write_bytes(buf, &raw);
        }
    }
    Ok(())
}

pub fn encode(data: &PlutusData) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_data(&mut buf, data)?;
    Ok(buf)
}

pub fn to_hex(data: &PlutusData) -> Result<String> {
    Ok(hex::encode(encode(data)?))
}
