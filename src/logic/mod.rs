use crate::core::{Board, Mark};

/// 勝利ラインの一覧 (行 → 列 → 対角線の順で判定する)
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 最初に揃っているラインを返す
pub fn winning_line(board: &Board) -> Option<[usize; 3]> {
    WIN_LINES.iter().copied().find(|&[a, b, c]| {
        let mark = board[a];
        !mark.is_empty() && mark == board[b] && mark == board[c]
    })
}

/// 勝者判定。揃ったラインが無ければ None
pub fn evaluate(board: &Board) -> Option<Mark> {
    winning_line(board).map(|[a, _, _]| board[a])
}
