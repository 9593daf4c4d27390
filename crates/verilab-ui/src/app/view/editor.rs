use iced::widget::text::Wrapping;
use iced::widget::{button, container, horizontal_space, row, text, text_editor, Row, Space};
use iced::{Background, Border, Color, Element, Font, Length, Padding, Theme};
use verilab_core::{BorderState, Buffer};

use crate::app::update::editor_key_binding;
use crate::app::{App, Message};
use crate::highlighter::{HighlightSettings, VerilogHighlighter};
use crate::theme::{border_color, colors, EditorPalette};

/// Width of the verdict border around the editor.
const BORDER_WIDTH: f32 = 2.0;

impl App {
    pub fn view_tabs(&self) -> Element<'_, Message> {
        let active = self.session.active_id();
        let mut tabs_vec: Vec<Element<'_, Message>> = self
            .session
            .buffers()
            .map(|buffer| self.make_tab(buffer, active == Some(buffer.id())))
            .collect();

        tabs_vec.push(
            button(text("+").size(14).color(colors::TEXT_SECONDARY))
                .padding(Padding::from([6, 12]))
                .style(|_: &Theme, status: button::Status| button::Style {
                    background: Some(Background::Color(match status {
                        button::Status::Hovered => colors::BG_HOVER,
                        _ => Color::TRANSPARENT,
                    })),
                    text_color: colors::TEXT_PRIMARY,
                    ..Default::default()
                })
                .on_press(Message::NewTab)
                .into(),
        );
        tabs_vec.push(horizontal_space().into());

        let tabs_row = Row::with_children(tabs_vec)
            .spacing(1)
            .align_y(iced::Alignment::End);

        container(tabs_row)
            .width(Length::Fill)
            .height(36)
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

    fn make_tab(&self, buffer: &Buffer, is_active: bool) -> Element<'_, Message> {
        // Dot shows the last verdict of a background tab
        let marker: Element<'_, Message> = match buffer.border_state() {
            BorderState::Neutral => Space::with_width(0).into(),
            state => row![
                Space::with_width(8),
                text("●").size(10).color(border_color(state)),
            ]
            .into(),
        };

        let tab_content = row![
            text(buffer.label().to_string()).size(13).color(if is_active {
                colors::TEXT_PRIMARY
            } else {
                colors::TEXT_SECONDARY
            }),
            marker,
        ]
        .align_y(iced::Alignment::Center);

        let bg = if is_active {
            colors::BG_DARK
        } else {
            colors::BG_MEDIUM
        };

        button(tab_content)
            .padding(Padding::from([8, 14]))
            .style(move |_, status| {
                let hover_bg = match status {
                    button::Status::Hovered if !is_active => colors::BG_HOVER,
                    _ => bg,
                };
                button::Style {
                    background: Some(Background::Color(hover_bg)),
                    text_color: colors::TEXT_PRIMARY,
                    border: Border {
                        color: if is_active {
                            colors::ACCENT
                        } else {
                            Color::TRANSPARENT
                        },
                        width: if is_active { 2.0 } else { 0.0 },
                        radius: 0.0.into(),
                    },
                    ..Default::default()
                }
            })
            .on_press(Message::TabSelected(buffer.id()))
            .into()
    }

    pub fn view_editor(&self) -> Element<'_, Message> {
        let (Some(buffer), Some(pane)) = (self.session.active_buffer().ok(), self.active_pane())
        else {
            return container(text("No tab open").size(16).color(colors::TEXT_MUTED))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into();
        };

        let palette = EditorPalette::for_theme(pane.theme);
        let highlight_settings = HighlightSettings {
            mode: pane.mode,
            theme: pane.theme,
        };
        let wrapping = if self.config.editor.wrap {
            Wrapping::Word
        } else {
            Wrapping::None
        };

        let editor = text_editor(&pane.content)
            .height(Length::Fill)
            .padding(iced::Padding { top: 12.0, right: 16.0, bottom: 12.0, left: 12.0 })
            .font(Font::MONOSPACE)
            .size(self.config.editor.font_size)
            .wrapping(wrapping)
            .style(move |_theme: &Theme, _status| text_editor::Style {
                background: Background::Color(palette.background),
                border: Border {
                    width: 0.0,
                    radius: 0.0.into(),
                    color: Color::TRANSPARENT,
                },
                icon: palette.muted,
                placeholder: palette.muted,
                value: palette.text,
                selection: palette.selection,
            })
            .highlight_with::<VerilogHighlighter>(highlight_settings, |highlight, _theme| {
                highlight.to_format(Font::MONOSPACE)
            })
            .key_binding(editor_key_binding)
            .on_action(Message::EditorAction);

        let frame = border_color(buffer.border_state());

        container(editor)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(BORDER_WIDTH)
            .style(move |_| container::Style {
                background: Some(Background::Color(palette.background)),
                border: Border {
                    color: frame,
                    width: BORDER_WIDTH,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }
}
