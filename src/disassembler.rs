use crate::adjacency::{exit_slot, Chooser, Direction};
use crate::opcode_tables::opcode_for;
use crate::program::Program;
use crate::segmenter::{Block, BlockId};
use std::fmt::Write;

/// Human-readable listing of a program's blocks and exits
pub struct Disassembler<'a> {
    program: &'a Program,
}

impl<'a> Disassembler<'a> {
    pub fn new(program: &'a Program) -> Self {
        Disassembler { program }
    }

    /// Summary line plus one section per block
    pub fn listing(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(
            &mut output,
            "program: {}x{} codels, {} blocks, start {}",
            self.program.width(),
            self.program.height(),
            self.program.block_count(),
            self.program.start()
        );

        for (id, block) in self.program.blocks() {
            if block.color.is_black() {
                continue;
            }
            output.push('\n');
            output.push_str(&self.format_block(id, block));
        }
        output
    }

    /// Header line of a block followed by its eight exits
    pub fn format_block(&self, id: BlockId, block: &Block) -> String {
        let mut output = String::new();
        let marker = if id == self.program.start() { "  <- start" } else { "" };
        let bounds = match block.bounds() {
            Some((lo, hi)) => format!("{lo}..{hi}"),
            None => "-".to_string(),
        };
        let _ = writeln!(
            &mut output,
            "{id}: {} size={} at {bounds}{marker}",
            block.color,
            block.size()
        );

        let exits = self.program.adjacency().exits_of(id);
        for dp in Direction::ALL {
            for cc in Chooser::ALL {
                let target = exits
                    .map(|slots| slots[exit_slot(dp, cc)])
                    .unwrap_or(BlockId::BOUNDARY);
                let _ = if target.is_boundary() {
                    writeln!(&mut output, "    {dp:>5}/{cc:<5} -> boundary")
                } else {
                    let to = self.program.block(target).color;
                    writeln!(
                        &mut output,
                        "    {dp:>5}/{cc:<5} -> {target} ({to}, {})",
                        opcode_for(block.color, to)
                    )
                };
            }
        }
        output
    }
}
