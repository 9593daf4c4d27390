use iced::widget::{button, container, horizontal_space, pick_list, row, text, Space};
use iced::{Background, Border, Color, Element, Length, Padding, Theme};
use verilab_core::library;

use crate::app::{App, Message};
use crate::theme::colors;

fn toolbar_button(label: &str, message: Message) -> Element<'_, Message> {
    button(text(label).size(12).color(colors::TEXT_PRIMARY))
        .padding(Padding::from([6, 12]))
        .style(|_: &Theme, status: button::Status| {
            let bg = match status {
                button::Status::Hovered => colors::BG_HOVER,
                _ => colors::BG_LIGHT,
            };
            button::Style {
                background: Some(Background::Color(bg)),
                text_color: colors::TEXT_PRIMARY,
                border: Border {
                    color: colors::BORDER,
                    width: 1.0,
                    radius: 4.0.into(),
                },
                ..Default::default()
            }
        })
        .on_press(message)
        .into()
}

impl App {
    pub fn view_toolbar(&self) -> Element<'_, Message> {
        let examples: Vec<String> = library::names().map(str::to_string).collect();

        let picker = pick_list(examples, self.selected_example.clone(), Message::ExampleSelected)
            .placeholder("Examples")
            .text_size(12)
            .padding(Padding::from([6, 10]));

        let run_btn = button(text("Run").size(12).color(Color::WHITE))
            .padding(Padding::from([6, 18]))
            .style(|_: &Theme, status: button::Status| {
                let bg = match status {
                    button::Status::Hovered => Color::from_rgb(0.24, 0.82, 0.42),
                    _ => colors::SUCCESS,
                };
                button::Style {
                    background: Some(Background::Color(bg)),
                    text_color: Color::WHITE,
                    border: Border {
                        radius: 4.0.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                }
            })
            .on_press(Message::Run);

        let bar = row![
            text("Verilab").size(14).color(colors::ACCENT),
            Space::with_width(16),
            toolbar_button("New Tab", Message::NewTab),
            Space::with_width(8),
            picker,
            Space::with_width(8),
            toolbar_button("Import", Message::ImportFile),
            Space::with_width(8),
            toolbar_button("Export", Message::ExportFile),
            Space::with_width(8),
            toolbar_button("Theme", Message::ToggleTheme),
            Space::with_width(8),
            toolbar_button("Syntax", Message::ToggleSyntax),
            horizontal_space(),
            run_btn,
        ]
        .padding(Padding::from([6, 12]))
        .align_y(iced::Alignment::Center);

        container(bar)
            .width(Length::Fill)
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BG_MEDIUM)),
                border: Border {
                    color: colors::BORDER,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }
}
