use super::Command;
use crate::cleanup::selection::PageDirection;

/// Map one inbound chat message to a [`Command`].
///
/// Slash commands are case-insensitive; anything that does not start with
/// `/` passes through as [`Command::Text`] untouched (confirmation tokens
/// are case-sensitive and must not be normalized here).
pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return Command::Text(trimmed.to_string());
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or_default().to_lowercase();
    let args = parts.next().unwrap_or("").trim();

    match cmd.as_str() {
        "/start" => Command::Start,
        "/help" | "/?" => Command::Help,
        "/status" => Command::Status,
        "/space" => Command::Space,
        "/preview" => Command::Preview,
        "/select" => Command::ShowSelection,
        "/toggle" => match args.parse::<usize>() {
            Ok(n) => Command::Toggle(n),
            Err(_) => Command::Unknown(trimmed.to_string()),
        },
        "/page" => match args {
            "next" => Command::Page(PageDirection::Next),
            "prev" | "previous" => Command::Page(PageDirection::Prev),
            _ => Command::Unknown(trimmed.to_string()),
        },
        "/next" => Command::Page(PageDirection::Next),
        "/prev" => Command::Page(PageDirection::Prev),
        "/all" => Command::SelectAll,
        "/none" => Command::ClearAll,
        "/done" => Command::Arm,
        // Bare `/delete` means everything, matching the original CLI.
        "/delete" => Command::ArmExpression(if args.is_empty() {
            "all".to_string()
        } else {
            args.to_string()
        }),
        "/cancel" => Command::Cancel,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_command() {
        assert_eq!(parse_command("/preview"), Command::Preview);
    }

    #[test]
    fn commands_are_case_insensitive() {
        assert_eq!(parse_command("/PREVIEW"), Command::Preview);
        assert_eq!(parse_command("/Select"), Command::ShowSelection);
    }

    #[test]
    fn leading_whitespace_accepted() {
        assert_eq!(parse_command("  /status"), Command::Status);
    }

    #[test]
    fn toggle_parses_item_number() {
        assert_eq!(parse_command("/toggle 3"), Command::Toggle(3));
    }

    #[test]
    fn toggle_without_number_is_unknown() {
        assert_eq!(
            parse_command("/toggle abc"),
            Command::Unknown("/toggle abc".into())
        );
        assert_eq!(parse_command("/toggle"), Command::Unknown("/toggle".into()));
    }

    #[test]
    fn page_directions() {
        assert_eq!(parse_command("/page next"), Command::Page(PageDirection::Next));
        assert_eq!(parse_command("/page prev"), Command::Page(PageDirection::Prev));
        assert_eq!(parse_command("/next"), Command::Page(PageDirection::Next));
        assert_eq!(parse_command("/prev"), Command::Page(PageDirection::Prev));
    }

    #[test]
    fn delete_defaults_to_all() {
        assert_eq!(
            parse_command("/delete"),
            Command::ArmExpression("all".into())
        );
        assert_eq!(
            parse_command("/delete 1-10,25"),
            Command::ArmExpression("1-10,25".into())
        );
    }

    #[test]
    fn free_text_passes_through_verbatim() {
        assert_eq!(
            parse_command("CONFIRM DELETE"),
            Command::Text("CONFIRM DELETE".into())
        );
        assert_eq!(parse_command("  hello "), Command::Text("hello".into()));
    }

    #[test]
    fn unknown_slash_command_is_echoed() {
        assert_eq!(
            parse_command("/restart"),
            Command::Unknown("/restart".into())
        );
    }

    #[test]
    fn help_aliases() {
        assert_eq!(parse_command("/help"), Command::Help);
        assert_eq!(parse_command("/?"), Command::Help);
    }
}
