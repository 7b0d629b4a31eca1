//! Chunked-write helpers.
//!
//! Record boundaries are independent of how producers split their writes;
//! these helpers drive a session with an arbitrary chunk plan so tests can
//! exercise the accumulation boundaries directly.

use ringlog_core::{CoreResult, Session};

/// Splits `payload` into chunks of the given sizes, cycling through
/// `sizes` until the payload is exhausted.
///
/// An empty size list degenerates to one-byte chunks.
#[must_use]
pub fn chunk_plan<'a>(payload: &'a [u8], sizes: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = payload;
    let mut sizes = sizes.iter().filter(|&&n| n > 0).cycle();

    while !rest.is_empty() {
        let n = sizes.next().copied().unwrap_or(1).min(rest.len());
        let (chunk, tail) = rest.split_at(n);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}

/// Writes `payload` through `session` following a chunk plan, returning
/// the total number of records sealed.
pub fn write_chunked(
    session: &mut Session,
    payload: &[u8],
    sizes: &[usize],
) -> CoreResult<usize> {
    let mut sealed = 0;
    for chunk in chunk_plan(payload, sizes) {
        sealed += session.write(chunk)?;
    }
    Ok(sealed)
}
