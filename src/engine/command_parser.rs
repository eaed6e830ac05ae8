use crate::error::CommandError;
use crate::model::story::StoryRequest;

pub const COMMAND: &str = "!zkillstory";

/// Parses `!zkillstory <url> [tokens] [topic]`.
///
/// Returns `None` for lines that are not this command at all. Double quotes
/// group words, so a multi-word topic has to be quoted. Extra arguments are
/// ignored.
pub fn parse_command(line: &str) -> Option<Result<StoryRequest, CommandError>> {
    let rest = line.trim().strip_prefix(COMMAND)?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }

    Some(parse_args(rest))
}

fn parse_args(rest: &str) -> Result<StoryRequest, CommandError> {
    let mut args = split_args(rest)?.into_iter();

    let link = args.next().ok_or(CommandError::MissingLink)?;
    let mut request = StoryRequest::new(link);

    if let Some(tokens) = args.next() {
        let tokens = tokens
            .parse::<u32>()
            .map_err(|_| CommandError::BadTokens(tokens.clone()))?;
        request = request.with_tokens(tokens);
    }

    if let Some(topic) = args.next() {
        request = request.with_topic(topic);
    }

    Ok(request)
}

fn split_args(input: &str) -> Result<Vec<String>, CommandError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut started = false;

    for c in input.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                started = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if started {
                    args.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }

    if in_quotes {
        return Err(CommandError::UnterminatedQuote);
    }
    if started {
        args.push(current);
    }

    Ok(args)
}
