extern crate calculator;

use std::io;
use std::io::prelude::*;

use calculator::{Button, Problem};

fn get_input<I: BufRead, O: Write>(i: &mut I, o: &mut O, msg: &[u8]) -> Result<String, io::Error> {
    o.write_all(msg)?;
    o.flush()?;

    let mut buf = String::new();
    if i.read_line(&mut buf)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(buf)
}

fn get_number<I: BufRead, O: Write>(i: &mut I, o: &mut O, msg: &[u8]) -> Result<i64, io::Error> {
    loop {
        let input = get_input(i, o, msg)?;
        if let Ok(n) = input.trim().parse() {
            return Ok(n);
        }
    }
}

fn get_moves<I: BufRead, O: Write>(i: &mut I, o: &mut O) -> Result<usize, io::Error> {
    loop {
        let input = get_input(i, o, b"Input moves: ")?;
        if let Ok(n) = input.trim().parse() {
            return Ok(n);
        }
    }
}

fn get_buttons<I: BufRead, O: Write>(i: &mut I, o: &mut O) -> Result<Vec<Button>, io::Error> {
    loop {
        let input = get_input(i, o, b"Input buttons: ")?;
        match input.split_whitespace().map(|s| s.parse()).collect::<Result<Vec<Button>, _>>() {
            Ok(ref buttons) if buttons.is_empty() => (),
            Ok(buttons) => return Ok(buttons),
            Err(e) => writeln!(o, "{}", e)?,
        }
    }
}

fn get_portal<I: BufRead, O: Write>(i: &mut I, o: &mut O) -> Result<Option<(u32, u32)>, io::Error> {
    loop {
        let input = get_input(i, o, b"Input portal entrance and exit (blank for none): ")?;
        let widths: Vec<&str> = input.split_whitespace().collect();
        match widths.as_slice() {
            [] => return Ok(None),
            [entrance, exit] => {
                if let (Ok(entrance), Ok(exit)) = (entrance.parse(), exit.parse()) {
                    return Ok(Some((entrance, exit)));
                }
            }
            _ => (),
        }
    }
}

fn get_digit_limit<I: BufRead, O: Write>(i: &mut I, o: &mut O) -> Result<Option<usize>, io::Error> {
    loop {
        let input = get_input(i, o, b"Input digit limit (blank for none): ")?;
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        if let Ok(n) = input.parse() {
            return Ok(Some(n));
        }
    }
}

fn get_problem<I: BufRead, O: Write>(i: &mut I, o: &mut O) -> Result<Problem, io::Error> {
    loop {
        let initial = get_number(i, o, b"Input n: ")?;
        let goal = get_number(i, o, b"Input goal: ")?;
        let moves = get_moves(i, o)?;
        let buttons = get_buttons(i, o)?;
        let portal = get_portal(i, o)?;
        let digit_limit = get_digit_limit(i, o)?;

        let problem = Problem::new(initial, goal, moves, buttons).and_then(|problem| match portal {
            Some((entrance, exit)) => problem.with_portal(entrance, exit),
            None => Ok(problem),
        }).and_then(|problem| match digit_limit {
            Some(limit) => problem.with_digit_limit(limit),
            None => Ok(problem),
        });

        match problem {
            Ok(problem) => return Ok(problem),
            Err(e) => writeln!(o, "Invalid puzzle: {}", e)?,
        }
    }
}

fn main() {
    let stdin = io::stdin();
    let mut stdin = stdin.lock();

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let problem = get_problem(&mut stdin, &mut stdout).expect("IO Error");

    match problem.solve() {
        Some(path) => {
            write!(stdout, "Path found:").expect("IO Error");
            for step in path.iter() {
                write!(stdout, " {}", step.label).expect("IO Error");
            }
            write!(stdout, "\n").expect("IO Error");
            for step in path.iter() {
                writeln!(stdout, "  {}", step).expect("IO Error");
            }
            writeln!(stdout, "  {}", problem.goal()).expect("IO Error");
        }
        None => {
            write!(stdout, "Path not found\n").expect("IO Error");
        }
    }
}
