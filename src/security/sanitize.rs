/// Strip C0 (U+0000–U+001F), DEL (U+007F) and C1 (U+0080–U+009F) control
/// characters from captured subprocess output.
///
/// Terminal escape sequences embedded in stdout/stderr could otherwise inject
/// into the caller's terminal or log files. Nothing in these ranges is
/// semantically required in a tool payload, so everything is dropped,
/// newlines and tabs included.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !is_stripped_control(*c)).collect()
}

fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{0000}'..='\u{001F}' | '\u{007F}'..='\u{009F}')
}
