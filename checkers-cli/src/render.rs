//! Terminal rendering of boards and events

use checkers_core::{Board, GameEvent, Square, BOARD_SIZE};

/// Board with row/column labels; `highlights` are marked with `*`
pub fn render_board(board: &Board, highlights: &[Square]) -> String {
    let mut out = String::from("   ");
    for col in 0..BOARD_SIZE {
        out.push_str(&format!(" {}", col));
    }
    out.push('\n');

    for row in 0..BOARD_SIZE {
        out.push_str(&format!(" {} ", row));
        for col in 0..BOARD_SIZE {
            let Some(sq) = Square::new(row, col) else {
                continue;
            };
            let cell = match board.get(sq) {
                Some(piece) => piece.symbol(),
                None if highlights.contains(&sq) => '*',
                None if sq.is_playable() => '.',
                None => ' ',
            };
            out.push(' ');
            out.push(cell);
        }
        out.push('\n');
    }

    out
}

/// One-line description of an event
pub fn describe_event(event: &GameEvent) -> String {
    match event {
        GameEvent::PieceMoved {
            from,
            to,
            was_capture,
            was_promotion,
            ..
        } => {
            let mut line = if *was_capture {
                format!("{} x {}", from, to)
            } else {
                format!("{} - {}", from, to)
            };
            if *was_promotion {
                line.push_str(" (crowned)");
            }
            line
        }
        GameEvent::TurnChanged { side } => format!("{:?} to move", side),
        GameEvent::GameEnded { outcome } => format!("Game over: {}", outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkers_core::{Outcome, PieceId, Side};

    #[test]
    fn test_render_marks_highlights() {
        let board = Board::empty();
        let target = Square::new(4, 1).unwrap();
        let text = render_board(&board, &[target]);
        let row4 = text.lines().nth(5).unwrap();
        assert_eq!(row4, " 4    *   .   .   .");
        assert_eq!(text.matches('*').count(), 1);
    }

    #[test]
    fn test_render_opening() {
        let text = render_board(&Board::standard(), &[]);
        assert_eq!(text.lines().count(), 9);
        assert_eq!(text.matches('b').count(), 12);
        assert_eq!(text.matches('r').count(), 12);
    }

    #[test]
    fn test_describe_events() {
        let from = Square::new(4, 3).unwrap();
        let to = Square::new(2, 5).unwrap();
        let moved = GameEvent::PieceMoved {
            piece: PieceId(0),
            from,
            to,
            was_capture: true,
            was_promotion: false,
        };
        assert_eq!(describe_event(&moved), "4,3 x 2,5");
        assert_eq!(
            describe_event(&GameEvent::GameEnded { outcome: Outcome::Win(Side::Red) }),
            "Game over: Red wins"
        );
    }
}
