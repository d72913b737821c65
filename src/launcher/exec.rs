use super::LaunchError;

/// Builds an argument vector from a desktop entry `Exec` line.
///
/// Arguments are split on unquoted whitespace; double quotes group and
/// `\` escapes the next character inside them. `%u`, `%U`, `%f` and `%F`
/// expand to `uri`, `%%` to a literal `%`, and every other field code is
/// dropped. An argument consisting only of a dropped code is removed.
///
/// # Errors
/// Returns `LaunchError::InvalidExec` for unterminated quotes, a trailing
/// `%`, or a line that yields no program.
pub fn expand_exec(exec: &str, uri: &str) -> Result<Vec<String>, LaunchError> {
    let invalid = |reason: &str| LaunchError::InvalidExec {
        exec: exec.to_string(),
        reason: reason.to_string(),
    };

    let argv: Vec<String> = split_args(exec)
        .ok_or_else(|| invalid("unterminated quote"))?
        .into_iter()
        .map(|arg| expand_field_codes(&arg, uri).ok_or_else(|| invalid("trailing '%'")))
        .filter_map(Result::transpose)
        .collect::<Result<_, _>>()?;

    if argv.is_empty() {
        return Err(invalid("no program"));
    }

    Ok(argv)
}

fn split_args(exec: &str) -> Option<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quoted = false;
    let mut chars = exec.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                quoted = !quoted;
                in_arg = true;
            }
            '\\' if quoted => current.push(chars.next()?),
            c if c.is_whitespace() && !quoted => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            c => {
                current.push(c);
                in_arg = true;
            }
        }
    }

    if quoted {
        return None;
    }

    if in_arg {
        args.push(current);
    }

    Some(args)
}

/// Expands field codes in one argument.
///
/// Returns `None` for a malformed argument and `Some(None)` when the
/// argument should be removed.
fn expand_field_codes(arg: &str, uri: &str) -> Option<Option<String>> {
    let mut out = String::with_capacity(arg.len());
    let mut dropped_code = false;
    let mut chars = arg.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.next()? {
            'u' | 'U' | 'f' | 'F' => out.push_str(uri),
            '%' => out.push('%'),
            _ => dropped_code = true,
        }
    }

    if out.is_empty() && dropped_code {
        return Some(None);
    }

    Some(Some(out))
}
