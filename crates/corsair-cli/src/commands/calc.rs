use corsair_story::console::ask_line;
use corsair_story::{Console, InputPolicy, StoryError, Style};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("Math Error")]
    DivisionByZero,

    #[error("Invalid operation. Please try again.")]
    UnknownOperation,
}

/// Apply one of `+ - * /` to two numbers.
pub fn evaluate(a: f64, op: &str, b: f64) -> Result<f64, CalcError> {
    match op {
        "+" => Ok(a + b),
        "-" => Ok(a - b),
        "*" => Ok(a * b),
        "/" if b == 0.0 => Err(CalcError::DivisionByZero),
        "/" => Ok(a / b),
        _ => Err(CalcError::UnknownOperation),
    }
}

/// Whole results keep one decimal place, e.g. `5.0`.
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

pub fn run<C: Console>(console: &mut C) -> Result<(), String> {
    match calculate(console, &InputPolicy::default()) {
        Ok(()) | Err(StoryError::InputClosed) => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

fn calculate<C: Console>(console: &mut C, policy: &InputPolicy) -> Result<(), StoryError> {
    loop {
        let a = ask_number(console, "Enter first number: ", policy)?;
        let b = ask_number(console, "Enter second number: ", policy)?;
        let op = ask_line(console, "Enter operation (+, -, *, /):  ", policy)?;

        match evaluate(a, op.trim(), b) {
            Ok(value) => console.say(Style::Narration, &format_number(value)),
            Err(e @ CalcError::DivisionByZero) => console.say(Style::Loss, &e.to_string()),
            Err(e) => {
                console.say(Style::Notice, &e.to_string());
                continue;
            }
        }

        loop {
            let answer = ask_line(console, "Do you want to calculate again? (yes/no): ", policy)?;
            match answer.trim() {
                "yes" => break,
                "no" => {
                    console.say(Style::Banner, "Thank you for using the calculator!");
                    return Ok(());
                }
                _ => console.say(Style::Notice, "Invalid input. Please type 'yes' or 'no'."),
            }
        }
    }
}

fn ask_number<C: Console>(console: &mut C, prompt: &str, policy: &InputPolicy) -> Result<f64, StoryError> {
    loop {
        let line = ask_line(console, prompt, policy)?;
        match line.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => return Ok(value),
            _ => console.say(Style::Notice, "Please enter a number."),
        }
    }
}
