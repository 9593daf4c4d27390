pub mod dialogs;
pub mod editor;
pub mod toolbar;

use iced::widget::{column, container, horizontal_space, mouse_area, row, scrollable, stack, text, Space};
use iced::{Background, Border, Color, Element, Font, Length, Padding};

use crate::app::{App, BackendStatus, Message};
use crate::theme::colors;
use verilab_core::EditorWidget;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let content = column![
            self.view_toolbar(),
            self.view_tabs(),
            self.view_editor(),
            self.view_output(),
            self.view_status_bar(),
        ];

        let main_view: Element<'_, Message> = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BG_DARK)),
                ..Default::default()
            })
            .into();

        match &self.notice {
            Some(notice) => stack![
                main_view,
                mouse_area(
                    container(Space::new(Length::Fill, Length::Fill))
                        .width(Length::Fill)
                        .height(Length::Fill)
                        .style(|_| container::Style {
                            background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.5))),
                            ..Default::default()
                        })
                )
                .on_press(Message::DismissNotice),
                self.view_notice_modal(notice),
            ]
            .into(),
            None => main_view,
        }
    }

    pub fn view_output(&self) -> Element<'_, Message> {
        let header = row![
            text("OUTPUT").size(11).color(colors::TEXT_SECONDARY),
            horizontal_space(),
        ]
        .padding(Padding::from([4, 12]));

        let body = scrollable(
            text(&self.output)
                .size(13)
                .font(Font::MONOSPACE)
                .color(colors::TEXT_PRIMARY),
        )
        .width(Length::Fill)
        .height(Length::Fill);

        container(column![header, container(body).padding(Padding::from([4, 12]))])
            .width(Length::Fill)
            .height(Length::Fixed(180.0))
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

    pub fn view_status_bar(&self) -> Element<'_, Message> {
        let backend: Element<'_, Message> = match &self.backend_status {
            BackendStatus::Unreachable(_) => text("Server not reachable")
                .size(12)
                .color(colors::WARNING)
                .into(),
            BackendStatus::Reachable => text("Server online")
                .size(12)
                .color(colors::SUCCESS)
                .into(),
            BackendStatus::Unknown => Space::with_width(0).into(),
        };

        let running = match self.session.in_flight() {
            0 => String::new(),
            n => format!("{} running", n),
        };

        let label = self
            .session
            .active_buffer()
            .map(|b| b.label().to_string())
            .unwrap_or_else(|_| "No tab".to_string());

        let (mode, theme) = self
            .active_pane()
            .map(|p| (p.syntax_mode().name(), p.theme().name()))
            .unwrap_or(("text", ""));

        let status_content = row![
            text(&self.status_message)
                .size(12)
                .color(colors::TEXT_SECONDARY),
            horizontal_space(),
            backend,
            Space::with_width(24),
            text(running).size(12).color(colors::ACCENT),
            Space::with_width(24),
            text(label).size(12).color(colors::TEXT_PRIMARY),
            Space::with_width(24),
            text(mode).size(12).color(colors::ACCENT),
            Space::with_width(24),
            text(theme).size(12).color(colors::TEXT_SECONDARY),
            Space::with_width(12),
        ]
        .padding(Padding::from([6, 12]))
        .align_y(iced::Alignment::Center);

        container(status_content)
            .width(Length::Fill)
            .height(28)
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
