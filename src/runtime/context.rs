//! Screenplay context: the loaded screenplay plus the execution cursor

use crate::domain::errors::EngineError;
use crate::types::instruction::Instruction;
use crate::types::screenplay::{BlockId, EventBlock, Screenplay};

/// Position of the interpreter: block index and instruction index within that block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub block_index: usize,
    pub instruction_index: usize,
}

impl Cursor {
    pub fn new(block_index: usize, instruction_index: usize) -> Self {
        Self {
            block_index,
            instruction_index,
        }
    }
}

/// Where the cursor went after an advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    /// Next instruction of the same block
    Stepped,
    /// First instruction of another block
    Transferred { from: BlockId, to: BlockId },
    /// Last instruction of a terminal block; the cursor did not move
    Exhausted,
}

/// Owned, mutable cursor over an immutable screenplay.
///
/// Only the interpreter moves the cursor; save restore goes through
/// [`ScreenplayContext::restore_cursor`].
#[derive(Debug, Clone)]
pub struct ScreenplayContext {
    screenplay: Screenplay,
    cursor: Cursor,
}

impl ScreenplayContext {
    pub fn new(screenplay: Screenplay) -> Self {
        Self {
            screenplay,
            cursor: Cursor::default(),
        }
    }

    pub fn screenplay(&self) -> &Screenplay {
        &self.screenplay
    }

    pub fn text_pool(&self) -> &[String] {
        self.screenplay.text_pool()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn current_block_index(&self) -> usize {
        self.cursor.block_index
    }

    pub fn current_instruction_index(&self) -> usize {
        self.cursor.instruction_index
    }

    pub fn index_of(&self, id: BlockId) -> Option<usize> {
        self.screenplay.index_of(id)
    }

    /// Block under the cursor
    pub fn current_block(&self) -> Result<&EventBlock, EngineError> {
        let index = self.cursor.block_index;
        self.screenplay
            .block(index)
            .ok_or(EngineError::BlockOutOfRange {
                index,
                len: self.screenplay.len(),
            })
    }

    /// Instruction under the cursor
    pub fn current_instruction(&self) -> Result<&Instruction, EngineError> {
        self.instruction_at(self.cursor)
    }

    pub fn instruction_at(&self, cursor: Cursor) -> Result<&Instruction, EngineError> {
        self.validate(cursor)?;
        let block = &self.screenplay.blocks()[cursor.block_index];
        Ok(&block.instructions[cursor.instruction_index])
    }

    /// Check a cursor against the loaded blocks
    pub fn validate(&self, cursor: Cursor) -> Result<(), EngineError> {
        let block = self
            .screenplay
            .block(cursor.block_index)
            .ok_or(EngineError::BlockOutOfRange {
                index: cursor.block_index,
                len: self.screenplay.len(),
            })?;
        if cursor.instruction_index >= block.len() {
            return Err(EngineError::InstructionOutOfRange {
                block_id: block.id,
                index: cursor.instruction_index,
                len: block.len(),
            });
        }
        Ok(())
    }

    /// Apply the block-transfer rule using outgoing edge `edge`.
    ///
    /// On the last instruction of a block the cursor moves to the first instruction
    /// of `return_values[edge]`; otherwise it steps to the next instruction. Both
    /// fields are written together.
    pub(crate) fn advance(&mut self, edge: usize) -> Result<CursorMove, EngineError> {
        let block = self.current_block()?;
        if self.cursor.instruction_index + 1 < block.len() {
            self.cursor.instruction_index += 1;
            return Ok(CursorMove::Stepped);
        }

        if edge == 0 && block.is_terminal() {
            return Ok(CursorMove::Exhausted);
        }

        let from = block.id;
        let to = *block
            .return_values
            .get(edge)
            .ok_or(EngineError::EdgeOutOfRange {
                block_id: from,
                edge,
                available: block.return_values.len(),
            })?;
        let block_index = self
            .screenplay
            .index_of(to)
            .ok_or(EngineError::UnknownBlockId { id: to })?;

        self.cursor = Cursor::new(block_index, 0);
        Ok(CursorMove::Transferred { from, to })
    }

    /// Overwrite the cursor from a save; the cursor is validated first
    pub(crate) fn restore_cursor(&mut self, cursor: Cursor) -> Result<(), EngineError> {
        self.validate(cursor)?;
        self.cursor = cursor;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::screenplay::ScreenplayData;

    fn op(tag: &str) -> Instruction {
        Instruction::new(tag, vec![], vec![])
    }

    fn context() -> ScreenplayContext {
        let data = ScreenplayData {
            events: vec![
                EventBlock::new(10, vec![op("A"), op("B")], vec![20, 30]),
                EventBlock::new(20, vec![op("C")], vec![]),
                EventBlock::new(30, vec![op("D")], vec![10]),
            ],
            text_pool: vec![],
        };
        ScreenplayContext::new(Screenplay::from_data(data).unwrap())
    }

    #[test]
    fn steps_within_block_then_transfers() {
        let mut ctx = context();
        assert_eq!(ctx.advance(0), Ok(CursorMove::Stepped));
        assert_eq!(ctx.cursor(), Cursor::new(0, 1));

        assert_eq!(ctx.advance(0), Ok(CursorMove::Transferred { from: 10, to: 20 }));
        assert_eq!(ctx.cursor(), Cursor::new(1, 0));
    }

    #[test]
    fn explicit_edge_selects_target() {
        let mut ctx = context();
        ctx.restore_cursor(Cursor::new(0, 1)).unwrap();
        assert_eq!(ctx.advance(1), Ok(CursorMove::Transferred { from: 10, to: 30 }));
        assert_eq!(ctx.current_block().unwrap().id, 30);
    }

    #[test]
    fn missing_edge_is_structural() {
        let mut ctx = context();
        ctx.restore_cursor(Cursor::new(0, 1)).unwrap();
        assert_eq!(
            ctx.advance(5),
            Err(EngineError::EdgeOutOfRange {
                block_id: 10,
                edge: 5,
                available: 2
            })
        );
        assert_eq!(ctx.cursor(), Cursor::new(0, 1));
    }

    #[test]
    fn terminal_block_is_exhausted() {
        let mut ctx = context();
        ctx.restore_cursor(Cursor::new(1, 0)).unwrap();
        assert_eq!(ctx.advance(0), Ok(CursorMove::Exhausted));
        assert_eq!(ctx.cursor(), Cursor::new(1, 0));
    }

    #[test]
    fn restore_rejects_out_of_bounds() {
        let mut ctx = context();
        assert_eq!(
            ctx.restore_cursor(Cursor::new(9, 0)),
            Err(EngineError::BlockOutOfRange { index: 9, len: 3 })
        );
        assert_eq!(
            ctx.restore_cursor(Cursor::new(0, 2)),
            Err(EngineError::InstructionOutOfRange {
                block_id: 10,
                index: 2,
                len: 2
            })
        );
        assert_eq!(ctx.cursor(), Cursor::default());
    }
}
