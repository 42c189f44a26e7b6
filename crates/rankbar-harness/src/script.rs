#![forbid(unsafe_code)]

//! Line-based input scripts.
//!
//! One command per line; blank lines and `#` comments are skipped:
//!
//! ```text
//! wheel 600          # wheel at the chart center, delta 600
//! down 690 60        # primary press
//! move 690 160
//! up 690 160
//! click 690 400      # primary click
//! leave
//! scroll 1200        # absolute offset, no pointer involved
//! ```

use std::fmt;

use rankbar::{HorizontalChart, PointerEvent, PointerResult};

/// One scripted input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Pointer(PointerEvent),
    ScrollTo(f64),
}

/// A parse failure with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ScriptError {}

/// Parse a whole script. `center` is where wheel events land.
pub fn parse(source: &str, center: (f64, f64)) -> Result<Vec<Step>, ScriptError> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let line = raw.split('#').next().unwrap_or("").trim();
            (!line.is_empty()).then(|| {
                parse_line(line, center).map_err(|message| ScriptError {
                    line: i + 1,
                    message,
                })
            })
        })
        .collect()
}

fn parse_line(line: &str, (cx, cy): (f64, f64)) -> Result<Step, String> {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default().to_ascii_lowercase();
    let args = parts
        .map(|p| p.parse::<f64>().map_err(|_| format!("bad number {p:?}")))
        .collect::<Result<Vec<_>, _>>()?;

    let point = |args: &[f64]| match args {
        [x, y] => Ok((*x, *y)),
        _ => Err(format!("{command} takes x and y")),
    };

    let step = match command.as_str() {
        "wheel" => match args.as_slice() {
            [dy] => PointerEvent::wheel(cx, cy, *dy),
            [x, y, dy] => PointerEvent::wheel(*x, *y, *dy),
            _ => return Err("wheel takes dy or x y dy".into()),
        },
        "down" => point(&args).map(|(x, y)| PointerEvent::down(x, y))?,
        "up" => point(&args).map(|(x, y)| PointerEvent::up(x, y))?,
        "move" => point(&args).map(|(x, y)| PointerEvent::moved(x, y))?,
        "click" => point(&args).map(|(x, y)| PointerEvent::click(x, y))?,
        "leave" if args.is_empty() => PointerEvent::leave(),
        "scroll" => match args.as_slice() {
            [y] => return Ok(Step::ScrollTo(*y)),
            _ => return Err("scroll takes one offset".into()),
        },
        other => return Err(format!("unknown command {other:?}")),
    };
    Ok(Step::Pointer(step))
}

/// Replay `steps` against a rendered chart, returning each pointer result.
pub fn replay(chart: &mut HorizontalChart, steps: &[Step]) -> Vec<PointerResult> {
    steps
        .iter()
        .map(|step| match step {
            Step::Pointer(event) => {
                let result = chart.handle_pointer(event);
                tracing::debug!(?event, ?result, "replayed");
                result
            }
            Step::ScrollTo(y) => {
                chart.scroll_to(*y);
                PointerResult::Scrolled
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankbar::PointerEventKind;

    #[test]
    fn parses_every_command() {
        let script = "
            # warm up
            wheel 600
            wheel 10 20 -5
            down 1 2
            move 3 4   # drag
            up 5 6
            click 7 8
            leave
            scroll 1200
        ";
        let steps = parse(script, (100.0, 200.0)).unwrap();
        assert_eq!(steps.len(), 8);
        assert_eq!(
            steps[0],
            Step::Pointer(PointerEvent::wheel(100.0, 200.0, 600.0))
        );
        assert_eq!(
            steps[1],
            Step::Pointer(PointerEvent::wheel(10.0, 20.0, -5.0))
        );
        match steps[3] {
            Step::Pointer(event) => {
                assert_eq!(event.kind, PointerEventKind::Moved);
                assert_eq!((event.x, event.y), (3.0, 4.0));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(steps[7], Step::ScrollTo(1200.0));
    }

    #[test]
    fn reports_line_numbers() {
        let err = parse("wheel 1\n\njump 3", (0.0, 0.0)).unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.message.contains("jump"));

        let err = parse("down 1", (0.0, 0.0)).unwrap_err();
        assert_eq!(err.to_string(), "line 1: down takes x and y");

        let err = parse("move a b", (0.0, 0.0)).unwrap_err();
        assert!(err.message.contains("bad number"));
    }
}
