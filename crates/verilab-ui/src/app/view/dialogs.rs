use iced::widget::{button, column, container, text, Space};
use iced::{Background, Border, Element, Length, Padding, Theme};

use crate::app::{App, Message};
use crate::theme::colors;

impl App {
    /// Modal for errors the user has to acknowledge.
    pub fn view_notice_modal<'a>(&'a self, notice: &'a str) -> Element<'a, Message> {
        let modal_content = column![
            text("Notice").size(16).color(colors::TEXT_PRIMARY),
            Space::with_height(12),
            text(notice).size(13).color(colors::TEXT_SECONDARY),
            Space::with_height(16),
            button(text("OK").size(13).color(colors::TEXT_PRIMARY))
                .padding(Padding::from([8, 20]))
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
                .on_press(Message::DismissNotice),
        ]
        .padding(24)
        .width(Length::Fixed(380.0));

        container(container(modal_content).style(|_| container::Style {
            background: Some(Background::Color(colors::BG_MEDIUM)),
            border: Border {
                color: colors::BORDER,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        }))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
    }
}
