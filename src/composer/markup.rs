use maud::{Markup, Render, html};

use crate::AsStr;
use crate::session::EmojiTheme;

use super::model::Draft;

const FOOTER_ID: &str = "chat-footer";

const EMOJI_PANEL_HEIGHT: u32 = 400;

pub struct Footer<'a> {
    draft: &'a Draft,
    theme: EmojiTheme,
}

impl<'a> Footer<'a> {
    pub fn new(draft: &'a Draft, theme: EmojiTheme) -> Self {
        Self { draft, theme }
    }
}

impl Render for Footer<'_> {
    fn render(&self) -> Markup {
        let draft = self.draft;
        let can_send = draft.can_send();

        html! {
            form #(FOOTER_ID) ."flex items-end gap-2 bg-background p-2 text-foreground" data-action="submit" {
                (Attach)

                div ."relative flex flex-1 items-end" {
                    button ."absolute right-2 mb-3 text-primary" type="button" data-action="toggle-emoji" {
                        i ."fa-regular fa-face-smile" {}
                    }

                    (EmojiPanel { open: draft.emoji_panel_open, theme: self.theme })

                    textarea ."max-h-[7.5rem] w-full resize-none rounded-xl border border-secondary bg-secondary pr-10 text-foreground focus:border-transparent focus:ring-transparent"
                        name="message"
                        placeholder="Aa"
                        autofocus
                        style={ "height: " (draft.height_px) "px" } { (draft.text) }
                }

                button ."mb-1 flex rounded-full p-2 text-primary transition-all disabled:cursor-not-allowed"
                    ."hover:bg-secondary focus:bg-secondary"[!can_send]
                    ."bg-primary !text-white"[can_send]
                    type="submit"
                {
                    i ."fa-solid fa-paper-plane" {}
                }
            }

            @if let Some(error) = &draft.error {
                p #composer-error ."px-2 text-xs text-red-600" role="alert" { (error) }
            }
        }
    }
}

/// File picker affordance. Selections are not uploaded.
struct Attach;

impl Render for Attach {
    fn render(&self) -> Markup {
        html! {
            label ."mb-1 cursor-pointer rounded-full p-2 text-primary transition-all hover:bg-secondary focus:bg-secondary" for="file" {
                i ."fa-solid fa-plus" {}
                input #file .hidden type="file" multiple data-action="select-files" {}
            }
        }
    }
}

struct EmojiPanel {
    open: bool,
    theme: EmojiTheme,
}

impl Render for EmojiPanel {
    fn render(&self) -> Markup {
        html! {
            div ."absolute bottom-14 right-0 z-10" .block[self.open] .hidden[!self.open] {
                div .emoji-picker
                    data-theme=(self.theme.as_str())
                    data-skin-tones-disabled="true"
                    data-height=(EMOJI_PANEL_HEIGHT) {}
            }
        }
    }
}
