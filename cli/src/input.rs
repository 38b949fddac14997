use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use tictactoe_engine::games::tictactoe::Position;

pub struct Console {
    lines: Lines<BufReader<Stdin>>,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// `Ok(None)` once stdin is closed.
    pub async fn prompt(&mut self, message: &str) -> std::io::Result<Option<String>> {
        println!("{}", message);
        self.lines.next_line().await
    }

    /// A closed stdin counts as "no".
    pub async fn ask_yes_no(&mut self, question: &str) -> std::io::Result<bool> {
        loop {
            let Some(line) = self.prompt(question).await? else {
                return Ok(false);
            };
            match parse_yes_no(&line) {
                Some(answer) => return Ok(answer),
                None => println!("Please answer yes or no"),
            }
        }
    }
}

/// Accepts `12`, `1 2` or `1,2` for row 1, column 2.
pub fn parse_move(input: &str) -> Option<Position> {
    let digits: Vec<usize> = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| c.to_digit(10).map(|d| d as usize))
        .collect::<Option<Vec<usize>>>()?;

    match digits.as_slice() {
        &[row, col] => Some(Position::new(row, col)).filter(Position::is_on_board),
        _ => None,
    }
}

pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move_accepts_compact_and_spaced() {
        assert_eq!(parse_move("12"), Some(Position::new(1, 2)));
        assert_eq!(parse_move(" 0 2 "), Some(Position::new(0, 2)));
        assert_eq!(parse_move("2,0"), Some(Position::new(2, 0)));
    }

    #[test]
    fn test_parse_move_rejects_garbage() {
        assert_eq!(parse_move(""), None);
        assert_eq!(parse_move("3 1"), None);
        assert_eq!(parse_move("123"), None);
        assert_eq!(parse_move("a1"), None);
    }

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no("Yes"), Some(true));
        assert_eq!(parse_yes_no(" n "), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
    }
}
