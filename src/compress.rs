use alloc::vec::Vec;

use crate::error::Incompressible;
use crate::history::History;
use crate::strategy::Strategy;
use crate::tag::{self, MAX_MATCH};

/// Worst-case compressed size for `src_len` input bytes: one control byte
/// per 8 items over all-literal output, plus slop for the final control
/// byte and one trailing tag.
pub const fn max_compressed_len(src_len: usize) -> usize {
    src_len + src_len.div_ceil(8) + 4
}

/// Control byte of the tag group currently being emitted.
///
/// The control byte is reserved in the output ahead of its items and
/// patched once the group completes, so items can be appended as they are
/// produced.
struct GroupWriter {
    ctrl_idx: Option<usize>,
    bits: u8,
    /// Bit for the item in progress; 0 when a fresh group is needed.
    item_bit: u8,
}

impl GroupWriter {
    const fn new() -> Self {
        GroupWriter {
            ctrl_idx: None,
            bits: 0,
            item_bit: 0,
        }
    }

    /// Opens a new group when the current one has used its 8 slots.
    fn begin_item(&mut self, output: &mut Vec<u8>) {
        if self.item_bit == 0 {
            self.patch(output);
            self.ctrl_idx = Some(output.len());
            output.push(0);
            self.bits = 0;
            self.item_bit = 1;
        }
    }

    /// Flags the item in progress as a tag rather than a literal.
    fn mark_tag(&mut self) {
        self.bits |= self.item_bit;
    }

    fn end_item(&mut self) {
        self.item_bit <<= 1;
    }

    fn patch(&self, output: &mut Vec<u8>) {
        if let Some(idx) = self.ctrl_idx {
            output[idx] = self.bits;
        }
    }

    /// Writes the final control byte in place. Unused high bits stay zero.
    fn finish(self, output: &mut Vec<u8>) {
        self.patch(output);
    }
}

/// Compresses `source` with [`Strategy::DEFAULT`], appending to `output`.
///
/// Returns the number of bytes written. On [`Incompressible`] nothing is
/// left in `output`; the caller stores the input uncompressed instead.
pub fn compress(source: &[u8], output: &mut Vec<u8>) -> Result<usize, Incompressible> {
    compress_with_strategy(source, output, &Strategy::DEFAULT)
}

/// Compresses `source` under the given strategy, appending to `output`.
pub fn compress_with_strategy(
    source: &[u8],
    output: &mut Vec<u8>,
    strategy: &Strategy,
) -> Result<usize, Incompressible> {
    if strategy.match_size_good == 0
        || source.len() < strategy.min_input_size
        || source.len() > strategy.max_input_size
    {
        return Err(Incompressible);
    }

    let good_match = strategy.match_size_good.clamp(17, MAX_MATCH);
    // Rescale the percentage once so the per-step decay is a shift.
    let good_drop = strategy.match_size_drop.min(100) * 128 / 100;
    let need_rate = strategy.min_comp_rate.min(99);

    // Input size minus the required rate, without overflowing on inputs
    // longer than usize::MAX / 100.
    let result_max = if source.len() > usize::MAX / 100 {
        (source.len() / 100) * (100 - need_rate)
    } else {
        source.len() * (100 - need_rate) / 100
    };

    let start = output.len();
    compress_inner(source, output, strategy, good_match, good_drop, result_max).inspect_err(
        |_| {
            output.truncate(start);
        },
    )
}

fn compress_inner(
    source: &[u8],
    output: &mut Vec<u8>,
    strategy: &Strategy,
    good_match: usize,
    good_drop: usize,
    result_max: usize,
) -> Result<usize, Incompressible> {
    let start = output.len();
    // Fingerprints cover 4 bytes, so the last 3 positions are never indexed
    // and the final 4 bytes are reached only by literals or a running match.
    let index_end = source.len().saturating_sub(4);
    let mut history = History::new(source);
    let mut group = GroupWriter::new();
    let mut ip = 0;
    let mut found_match = false;

    while ip < index_end {
        // Checked once per item; an item emits at most 4 bytes (control
        // byte plus long tag), the slop max_compressed_len accounts for.
        if output.len() - start >= result_max {
            return Err(Incompressible);
        }
        // Fall out early on input that never matches at all, such as
        // already-compressed data.
        if !found_match && output.len() - start >= strategy.first_success_by {
            return Err(Incompressible);
        }

        group.begin_item(output);
        if let Some((len, off)) = history.find_match(source, ip, good_match, good_drop) {
            group.mark_tag();
            tag::write_tag(output, len, off);
            // Index the covered positions that still carry a full
            // fingerprint; a match may run past that point.
            let insert_end = (ip + len).min(index_end);
            for pos in ip..insert_end {
                history.insert(source, pos);
            }
            ip += len;
            found_match = true;
        } else {
            history.insert(source, ip);
            output.push(source[ip]);
            ip += 1;
        }
        group.end_item();
    }

    // The unindexed tail is emitted as literals, still on budget.
    while ip < source.len() {
        if output.len() - start >= result_max {
            return Err(Incompressible);
        }
        if !found_match && output.len() - start >= strategy.first_success_by {
            return Err(Incompressible);
        }

        group.begin_item(output);
        output.push(source[ip]);
        ip += 1;
        group.end_item();
    }

    group.finish(output);

    let written = output.len() - start;
    if written >= result_max {
        return Err(Incompressible);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn run_of_spaces_wire_bytes() {
        // One literal space, then a single long tag: offset 1, length 199.
        let input = vec![0x20u8; 200];
        let mut out = Vec::new();
        let written = compress(&input, &mut out).unwrap();
        assert_eq!(written, 5);
        assert_eq!(out, [0x02, 0x20, 0x0F, 0x01, 0xB5]);
    }

    #[test]
    fn group_writer_patches_full_groups() {
        let mut out = Vec::new();
        let mut group = GroupWriter::new();
        for i in 0..9 {
            group.begin_item(&mut out);
            if i % 2 == 1 {
                group.mark_tag();
                out.push(0xEE);
                out.push(0xEE);
            } else {
                out.push(0xAA);
            }
            group.end_item();
        }
        group.finish(&mut out);
        // First group: items 1,3,5,7 are tags.
        assert_eq!(out[0], 0b1010_1010);
        // Ninth item opens a second group, a lone literal.
        assert_eq!(out[out.len() - 2], 0x00);
        assert_eq!(out[out.len() - 1], 0xAA);
    }

    #[test]
    fn worst_case_bound_is_honored() {
        // 256 distinct bytes: all literals, so the control-byte overhead
        // pushes the output past result_max and the size check rejects it.
        let input: Vec<u8> = (0..=255u8).collect();
        let mut out = Vec::new();
        assert_eq!(
            compress_with_strategy(&input, &mut out, &Strategy::ALWAYS),
            Err(Incompressible)
        );
        assert!(out.is_empty());
        assert!(max_compressed_len(input.len()) >= input.len() + 32 + 4);
    }
}
