//! Screenplay validation report

use crate::types::screenplay::Screenplay;

/// Summary of a loaded screenplay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub blocks: usize,
    pub instructions: usize,
    pub pooled_strings: usize,
    pub terminal_blocks: usize,
    pub unresolved: Vec<String>,
    pub fingerprint: String,
}

impl CheckReport {
    pub fn new(screenplay: &Screenplay) -> Self {
        let blocks = screenplay.blocks();
        Self {
            blocks: blocks.len(),
            instructions: blocks.iter().map(|b| b.len()).sum(),
            pooled_strings: screenplay.text_pool().len(),
            terminal_blocks: blocks.iter().filter(|b| b.is_terminal()).count(),
            unresolved: screenplay
                .unresolved_tokens()
                .into_iter()
                .map(|t| {
                    format!(
                        "block {} instruction {}: {}",
                        t.block_id, t.instruction_index, t.token
                    )
                })
                .collect(),
            fingerprint: screenplay.fingerprint().to_string(),
        }
    }

    pub fn print(&self) {
        println!("blocks:          {}", self.blocks);
        println!("instructions:    {}", self.instructions);
        println!("pooled strings:  {}", self.pooled_strings);
        println!("terminal blocks: {}", self.terminal_blocks);
        println!("fingerprint:     {}", self.fingerprint);
        if self.unresolved.is_empty() {
            println!("all string tokens resolve");
        } else {
            println!("unresolved string tokens ({}):", self.unresolved.len());
            for entry in &self.unresolved {
                println!("  {entry}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::instruction::Instruction;
    use crate::types::screenplay::{EventBlock, ScreenplayData};

    #[test]
    fn counts_and_lists_unresolved() {
        let screenplay = Screenplay::from_data(ScreenplayData {
            events: vec![
                EventBlock::new(
                    1,
                    vec![
                        Instruction::new("PlayDialog", vec![], vec!["$0".into()]),
                        Instruction::new("PlayDialog", vec![], vec!["$5".into()]),
                    ],
                    vec![2],
                ),
                EventBlock::new(2, vec![Instruction::new("PlaySe", vec![], vec![])], vec![]),
            ],
            text_pool: vec!["a".into()],
        })
        .unwrap();

        let report = CheckReport::new(&screenplay);
        assert_eq!(report.blocks, 2);
        assert_eq!(report.instructions, 3);
        assert_eq!(report.terminal_blocks, 1);
        assert_eq!(report.unresolved, vec!["block 1 instruction 1: $5"]);
        assert_eq!(report.fingerprint.len(), 32);
    }
}
