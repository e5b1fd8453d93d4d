use maud::{Markup, Render, html};

use crate::AsStr;
use crate::disclosure::Placement;

use super::service::MenuView;

const TRIGGER_CLASS: &str = "rounded-full border border-secondary bg-background p-1.5 shadow-sm group-hover:visible group-hover:flex";
const ITEM_CLASS: &str =
    "flex w-full items-center gap-2 px-4 py-2 text-start text-sm hover:bg-secondary";

fn content_class(placement: Placement) -> String {
    let align = match placement {
        Placement::Below => "origin-top-right right-0",
        Placement::AboveRight => "origin-bottom-right right-0 bottom-full",
    };

    match placement.content_class() {
        Some(extra) => format!("absolute z-50 w-48 rounded-md shadow-lg {align} {extra}"),
        None => format!("absolute z-50 w-48 rounded-md shadow-lg {align}"),
    }
}

pub struct ActionMenu<'a>(pub &'a MenuView);

impl Render for ActionMenu<'_> {
    fn render(&self) -> Markup {
        let view = self.0;
        let visibility = if view.open { "visible" } else { "invisible" };

        html! {
            div ."absolute right-8 shrink-0" {
                div .relative data-chat=(view.chat.id.as_str()) {
                    button type="button"
                        class={ (TRIGGER_CLASS) " " (visibility) }
                        aria-expanded=(view.open)
                        data-action="toggle"
                    {
                        i ."fa-solid fa-ellipsis text-secondary-foreground" {}
                    }

                    @if view.open {
                        div class=(content_class(view.placement))
                            data-align=(view.placement.as_str())
                        {
                            @for action in &view.actions {
                                button type="button" class=(ITEM_CLASS) data-action=(action.as_str()) {
                                    i class={ "-ml-1 text-lg " (action.icon()) } {}
                                    (action.label())
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
