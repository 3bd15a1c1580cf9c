use crate::color::Color;
use std::fmt;

/// The eighteen instructions, selected by colour transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Noop,
    Push,
    Pop,
    Add,
    Subtract,
    Multiply,
    Divide,
    Mod,
    Not,
    Greater,
    Pointer,
    Switch,
    Duplicate,
    Roll,
    InNumber,
    InChar,
    OutNumber,
    OutChar,
}

/// Instruction for a transition, indexed `[lightness change][hue change]`
///
/// Row 0 is no lightness change, row 1 one step darker, row 2 two steps.
/// Column 0 is no hue change, then one step further round the hue cycle each.
pub const OPCODE_TABLE: [[Opcode; 6]; 3] = [
    [
        Opcode::Noop,
        Opcode::Add,
        Opcode::Divide,
        Opcode::Greater,
        Opcode::Duplicate,
        Opcode::InChar,
    ],
    [
        Opcode::Push,
        Opcode::Subtract,
        Opcode::Mod,
        Opcode::Pointer,
        Opcode::Roll,
        Opcode::OutNumber,
    ],
    [
        Opcode::Pop,
        Opcode::Multiply,
        Opcode::Not,
        Opcode::Switch,
        Opcode::InNumber,
        Opcode::OutChar,
    ],
];

/// Hue and lightness steps from one colour to another, if both are chromatic
pub fn color_delta(from: Color, to: Color) -> Option<(usize, usize)> {
    match (from, to) {
        (
            Color::Chromatic {
                hue: from_hue,
                lightness: from_light,
            },
            Color::Chromatic {
                hue: to_hue,
                lightness: to_light,
            },
        ) => {
            let hue_delta = (to_hue.index() + 6 - from_hue.index()) % 6;
            let light_delta = (to_light.index() + 3 - from_light.index()) % 3;
            Some((hue_delta, light_delta))
        }
        _ => None,
    }
}

/// Instruction executed when moving from a block of colour `from` into `to`
///
/// Transitions through white never execute anything.
pub fn opcode_for(from: Color, to: Color) -> Opcode {
    match color_delta(from, to) {
        Some((hue_delta, light_delta)) => OPCODE_TABLE[light_delta][hue_delta],
        None => Opcode::Noop,
    }
}

impl Opcode {
    pub fn name(self) -> &'static str {
        match self {
            Opcode::Noop => "noop",
            Opcode::Push => "push",
            Opcode::Pop => "pop",
            Opcode::Add => "add",
            Opcode::Subtract => "subtract",
            Opcode::Multiply => "multiply",
            Opcode::Divide => "divide",
            Opcode::Mod => "mod",
            Opcode::Not => "not",
            Opcode::Greater => "greater",
            Opcode::Pointer => "pointer",
            Opcode::Switch => "switch",
            Opcode::Duplicate => "duplicate",
            Opcode::Roll => "roll",
            Opcode::InNumber => "in_number",
            Opcode::InChar => "in_char",
            Opcode::OutNumber => "out_number",
            Opcode::OutChar => "out_char",
        }
    }

    /// Number of stack values the instruction consumes
    pub fn pops(self) -> usize {
        match self {
            Opcode::Noop | Opcode::Push | Opcode::InNumber | Opcode::InChar => 0,
            Opcode::Pop
            | Opcode::Not
            | Opcode::Pointer
            | Opcode::Switch
            | Opcode::Duplicate
            | Opcode::OutNumber
            | Opcode::OutChar => 1,
            Opcode::Add
            | Opcode::Subtract
            | Opcode::Multiply
            | Opcode::Divide
            | Opcode::Mod
            | Opcode::Greater
            | Opcode::Roll => 2,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Hue, Lightness};
    use std::collections::HashSet;
    use test_log::test;

    #[test]
    fn test_table_has_every_instruction_once() {
        let all: HashSet<Opcode> = OPCODE_TABLE.iter().flatten().copied().collect();
        assert_eq!(all.len(), 18);
    }

    #[test]
    fn test_every_chromatic_pair_resolves() {
        let mut seen = HashSet::new();
        for from_light in Lightness::ALL {
            for from_hue in Hue::ALL {
                for to_light in Lightness::ALL {
                    for to_hue in Hue::ALL {
                        let from = Color::new(from_hue, from_light);
                        let to = Color::new(to_hue, to_light);
                        let (hue_delta, light_delta) = color_delta(from, to).unwrap();
                        assert!(hue_delta < 6 && light_delta < 3);
                        seen.insert(opcode_for(from, to));
                    }
                }
            }
        }
        assert_eq!(seen.len(), 18);
    }

    #[test]
    fn test_known_transitions() {
        let red = Color::new(Hue::Red, Lightness::Normal);
        assert_eq!(opcode_for(red, red), Opcode::Noop);
        assert_eq!(
            opcode_for(red, Color::new(Hue::Red, Lightness::Dark)),
            Opcode::Push
        );
        assert_eq!(
            opcode_for(red, Color::new(Hue::Red, Lightness::Light)),
            Opcode::Pop
        );
        assert_eq!(
            opcode_for(red, Color::new(Hue::Yellow, Lightness::Normal)),
            Opcode::Add
        );
        // Wraps round both cycles: magenta light -> red dark is +1 hue, +2 lightness
        assert_eq!(
            opcode_for(
                Color::new(Hue::Magenta, Lightness::Light),
                Color::new(Hue::Red, Lightness::Dark)
            ),
            Opcode::Multiply
        );
        assert_eq!(
            opcode_for(
                Color::new(Hue::Red, Lightness::Dark),
                Color::new(Hue::Magenta, Lightness::Light)
            ),
            Opcode::OutNumber
        );
    }

    #[test]
    fn test_white_forces_noop() {
        let red = Color::new(Hue::Red, Lightness::Normal);
        assert_eq!(opcode_for(Color::White, red), Opcode::Noop);
        assert_eq!(opcode_for(red, Color::White), Opcode::Noop);
    }
}
