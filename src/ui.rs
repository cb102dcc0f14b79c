use ratatui::{prelude::*, widgets::*};

use crate::router::Route;

/// Renders the route tabs, highlighting the active view
pub fn render_tabs<'a>(titles: &[&'a str], selected: Option<usize>) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).bold())
        .divider("|")
}

/// Index of the tab for a route; unmatched routes select nothing
pub fn tab_index(route: &Route) -> Option<usize> {
    match route {
        Route::Ping => Some(0),
        Route::Counter => Some(1),
        Route::User(_) => Some(2),
        Route::NotFound(_) => None,
    }
}

/// Simple JSON syntax highlighting for pretty-printed documents
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    text.lines().map(highlight_json_line).collect()
}

fn highlight_json_line(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut chars = line.char_indices();
    let mut plain = String::new();

    while let Some((start, c)) = chars.next() {
        match c {
            '"' => {
                flush(&mut plain, &mut spans);
                let mut end = line.len();
                let mut escaped = false;
                for (i, ch) in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if ch == '\\' {
                        escaped = true;
                    } else if ch == '"' {
                        end = i + 1;
                        break;
                    }
                }
                let literal = &line[start..end];
                // A string followed by ':' is an object key
                let is_key = line[end..].trim_start().starts_with(':');
                let color = if is_key { Color::Cyan } else { Color::Green };
                spans.push(Span::styled(literal.to_string(), Style::default().fg(color)));
            }
            '{' | '}' | '[' | ']' => {
                flush(&mut plain, &mut spans);
                spans.push(Span::styled(c.to_string(), Style::default().fg(Color::Yellow)));
            }
            ',' | ':' => {
                flush(&mut plain, &mut spans);
                spans.push(Span::raw(c.to_string()));
            }
            _ => plain.push(c),
        }
    }
    flush(&mut plain, &mut spans);

    Line::from(spans)
}

/// Emit buffered bare tokens: numbers, literals and whitespace
fn flush(plain: &mut String, spans: &mut Vec<Span<'static>>) {
    if plain.is_empty() {
        return;
    }
    let token = std::mem::take(plain);
    let style = match token.trim() {
        "true" | "false" | "null" => Style::default().fg(Color::Magenta),
        t if !t.is_empty() && t.parse::<f64>().is_ok() => Style::default().fg(Color::Yellow),
        _ => Style::default(),
    };
    spans.push(Span::styled(token, style));
}

/// Action log color by action type
pub fn action_color(description: &str) -> Color {
    match description.split_whitespace().next().unwrap_or_default() {
        "PING" | "PONG" => Color::Magenta,
        "FETCH_USER" => Color::Blue,
        "FETCH_USER_FULFILLED" => Color::Green,
        "ERROR_FETCH_USER" => Color::Red,
        "INCREMENT" | "INCREMENT_IF_ODD" => Color::Yellow,
        "NAVIGATE" => Color::Cyan,
        _ => Color::Gray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors(line: &Line) -> Vec<(String, Option<Color>)> {
        line.spans.iter().map(|s| (s.content.to_string(), s.style.fg)).collect()
    }

    #[test]
    fn test_highlight_key_and_value() {
        let lines = highlight_json("  \"login\": \"octocat\",");
        let spans = colors(&lines[0]);
        assert!(spans.contains(&("\"login\"".to_string(), Some(Color::Cyan))));
        assert!(spans.contains(&("\"octocat\"".to_string(), Some(Color::Green))));
    }

    #[test]
    fn test_highlight_literals_and_numbers() {
        let spans = colors(&highlight_json("  \"id\": 583231,")[0]);
        assert!(spans.contains(&(" 583231".to_string(), Some(Color::Yellow))));

        let spans = colors(&highlight_json("  \"bio\": null")[0]);
        assert!(spans.contains(&(" null".to_string(), Some(Color::Magenta))));
    }

    #[test]
    fn test_highlight_escaped_quote() {
        let spans = colors(&highlight_json(r#"  "name": "a \"b\" c""#)[0]);
        assert!(spans.contains(&(r#""a \"b\" c""#.to_string(), Some(Color::Green))));
    }

    #[test]
    fn test_tab_index() {
        assert_eq!(tab_index(&Route::User(Some(String::from("x")))), Some(2));
        assert_eq!(tab_index(&Route::NotFound(String::from("/x"))), None);
    }
}
