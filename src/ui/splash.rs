//! Splash screen shown for the first two seconds.

use crate::transition::{GradientStop, TransitionKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

const LOGO: [&str; 6] = [
    "██████╗  ██████╗   ██████╗  ███████╗  ██████╗  ███████╗   ██████╗ ████████╗",
    "██╔══██╗ ██╔══██╗ ██╔═══██╗ ██╔════╝ ██╔══██╗ ██╔════╝  ██╔════╝ ╚══██╔══╝",
    "██████╔╝ ██████╔╝ ██║   ██║ ███████╗ ██████╔╝ █████╗    ██║         ██║   ",
    "██╔═══╝  ██╔══██╗ ██║   ██║ ╚════██║ ██╔═══╝  ██╔══╝    ██║         ██║   ",
    "██║      ██║  ██║ ╚██████╔╝ ███████║ ██║      ███████╗  ╚██████╗    ██║   ",
    "╚═╝      ╚═╝  ╚═╝  ╚═════╝  ╚══════╝ ╚═╝      ╚══════╝   ╚═════╝    ╚═╝   ",
];

/// Build time stamped by the build script, in milliseconds since the epoch.
fn build_date() -> Option<String> {
    let millis: i64 = env!("BUILD_TIMESTAMP").parse().ok()?;
    let built = chrono::DateTime::from_timestamp_millis(millis)?;
    Some(built.format("%Y-%m-%d").to_string())
}

/// Logo rows fade from the email gradient's first stop into LinkedIn's last.
fn row_color(row: usize) -> Color {
    let GradientStop(r0, g0, b0) = TransitionKind::Email.target_gradient()[0];
    let GradientStop(r1, g1, b1) = TransitionKind::Linkedin.target_gradient()[2];
    let t = row as f32 / (LOGO.len() - 1) as f32;
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color::Rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

pub fn render_splash(f: &mut Frame) {
    let mut lines: Vec<Line> = LOGO
        .iter()
        .enumerate()
        .map(|(row, text)| {
            Line::styled(
                *text,
                Style::default()
                    .fg(row_color(row))
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();

    let version = match build_date() {
        Some(date) => format!("v{} · built {}", env!("CARGO_PKG_VERSION"), date),
        None => format!("v{}", env!("CARGO_PKG_VERSION")),
    };
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Campaign analytics hub",
        Style::default().fg(Color::Gray),
    ));
    lines.push(Line::styled(
        version,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    ));

    let height = lines.len() as u16;
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(f.area());
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn splash_shows_tagline_and_version() {
        let mut terminal = Terminal::new(TestBackend::new(90, 20)).unwrap();
        terminal.draw(render_splash).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Campaign analytics hub"));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn logo_fades_between_channel_colours() {
        assert_eq!(row_color(0), Color::Rgb(0xf8, 0x71, 0x71));
        assert_eq!(row_color(LOGO.len() - 1), Color::Rgb(0x60, 0xa5, 0xfa));
    }
}
