use crate::error::DecompressionError;
use crate::tag::{self, EXTENDED_BASE_LEN};
use alloc::vec::Vec;

type Result<T> = core::result::Result<T, DecompressionError>;

/// Decompresses `source` into `output`, appending up to `raw_size` bytes.
///
/// The bytes appended during this call form the back-reference window;
/// tags may not reach before the call's starting position.
///
/// With `check_complete`, both the input and the `raw_size` bytes of output
/// must be consumed exactly, and anything else is [`Incomplete`]. Without
/// it the caller is slicing: decoding stops at whichever end is reached
/// first and the prefix produced so far is a success.
///
/// Returns the number of bytes appended.
///
/// [`Incomplete`]: DecompressionError::Incomplete
pub fn decompress(
    source: &[u8],
    raw_size: usize,
    output: &mut Vec<u8>,
    check_complete: bool,
) -> Result<usize> {
    let out_base = output.len();
    let out_end = out_base + raw_size;
    if output.capacity() < out_end {
        output.reserve(out_end - output.len());
    }

    let mut in_pos = 0;
    let in_end = source.len();

    while in_pos < in_end && output.len() < out_end {
        // One control byte, then up to 8 items (or as many as the
        // remaining input and output allow).
        let mut ctrl = source[in_pos];
        in_pos += 1;

        for _ in 0..8 {
            if in_pos >= in_end || output.len() >= out_end {
                break;
            }

            if ctrl & 1 != 0 {
                if in_pos + 2 > in_end {
                    return Err(DecompressionError::UnexpectedEof);
                }
                let mut len = tag::base_len(source[in_pos]);
                let off = tag::offset(source[in_pos], source[in_pos + 1]);
                in_pos += 2;
                if len == EXTENDED_BASE_LEN {
                    let Some(&ext) = source.get(in_pos) else {
                        return Err(DecompressionError::UnexpectedEof);
                    };
                    len += usize::from(ext);
                    in_pos += 1;
                }

                // A tag may promise more than the declared raw size still
                // allows; the output cap wins.
                len = len.min(out_end - output.len());
                copy_match(output, out_base, len, off)?;
            } else {
                output.push(source[in_pos]);
                in_pos += 1;
            }

            ctrl >>= 1;
        }
    }

    if check_complete && (output.len() != out_end || in_pos != in_end) {
        return Err(DecompressionError::Incomplete);
    }

    Ok(output.len() - out_base)
}

/// Copies `len` bytes starting `off` positions back in the output produced
/// by this call.
///
/// The source and destination regions may overlap; when `off < len` the
/// copy reads bytes it has itself just written, so it walks forward one
/// byte at a time. A single bulk copy would be wrong here.
#[inline]
fn copy_match(output: &mut Vec<u8>, out_base: usize, len: usize, off: usize) -> Result<()> {
    let produced = output.len() - out_base;
    if off == 0 || off > produced {
        return Err(DecompressionError::InvalidOffset);
    }

    if off == 1 {
        // A run of the previous byte.
        let last = output[output.len() - 1];
        output.resize(output.len() + len, last);
    } else {
        let src_pos = output.len() - off;
        for k in 0..len {
            let val = output[src_pos + k];
            output.push(val);
        }
    }

    Ok(())
}
