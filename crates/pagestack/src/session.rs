use crate::script::Command;
use anyhow::{Context, Error};
use pagestack_core::navigation::{
    ContentPage, NavigationEvent, NavigationStack, PageRef, PropertyValue,
};
use pagestack_core::settings::NavigationSettings;
use std::io::Write;
use std::sync::mpsc::Receiver;

/// Applies script commands to a navigation stack and reports what happened.
pub struct Session {
    nav: NavigationStack,
    events: Receiver<NavigationEvent>,
}

impl Session {
    pub fn new(settings: &NavigationSettings) -> Session {
        let mut nav = NavigationStack::from_settings(settings);
        let events = nav.subscribe();
        Session { nav, events }
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.nav
    }

    /// Runs `command` and writes one line per raised event to `out`.
    pub fn apply<W: Write>(&mut self, command: Command, out: &mut W) -> Result<(), Error> {
        tracing::debug!(?command, "applying command");

        match command {
            Command::Push {
                title,
                handles_back,
            } => {
                let page = ContentPage::new(title).handles_back(handles_back);
                self.nav.push(page.into_ref());
            }
            Command::Pop => {
                if self.nav.pop().is_none() {
                    writeln!(out, "nothing to pop")?;
                }
            }
            Command::PopToRoot => self.nav.pop_to_root(),
            Command::Back => {
                let handled = self.nav.send_back_button_pressed();
                writeln!(out, "back button handled: {}", handled)?;
            }
            Command::Insert { title, before } => {
                let before = self.find(&before)?;
                self.nav
                    .insert_page_before(ContentPage::new(title).into_ref(), &before)?;
            }
            Command::Remove(title) => {
                let page = self.find(&title)?;
                self.nav.remove_page(&page)?;
            }
            Command::Tint(color) => {
                self.nav.set_tint(color);
            }
            Command::BarBackground(color) => {
                self.nav.set_bar_background_color(color);
            }
            Command::BarText(color) => {
                self.nav.set_bar_text_color(color);
            }
            Command::Title(title) => {
                self.nav.set_title(title);
            }
            Command::Show => self.show(out)?,
        }

        self.report_events(out)
    }

    /// Topmost page with the given title.
    fn find(&self, title: &str) -> Result<PageRef, Error> {
        self.nav
            .pages()
            .rev()
            .find(|page| page.title() == Some(title))
            .cloned()
            .with_context(|| format!("no page titled {:?} in the stack", title))
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        let titles: Vec<&str> = self.nav.pages().map(|page| label(page)).collect();
        writeln!(
            out,
            "stack ({}): [{}]",
            self.nav.stack_depth(),
            titles.join(" > ")
        )?;
        writeln!(
            out,
            "tint: {}, bar background: {}, bar text: {}, title: {}",
            self.nav.tint(),
            self.nav.bar_background_color(),
            self.nav.bar_text_color(),
            self.nav.title().unwrap_or("-")
        )?;
        Ok(())
    }

    fn report_events<W: Write>(&mut self, out: &mut W) -> Result<(), Error> {
        for evt in self.events.try_iter() {
            writeln!(out, "{}", describe_event(&evt))?;
        }
        Ok(())
    }
}

fn label(page: &PageRef) -> &str {
    page.title().unwrap_or("<untitled>")
}

fn describe_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Page(Some(page)) => label(page).to_string(),
        PropertyValue::Page(None) => "-".to_string(),
        PropertyValue::Color(color) => color.to_string(),
        PropertyValue::Text(text) => text.clone().unwrap_or_else(|| "-".to_string()),
    }
}

fn describe_event(evt: &NavigationEvent) -> String {
    match evt {
        NavigationEvent::Pushed(page) => format!("pushed {}", label(page)),
        NavigationEvent::Popped(page) => format!("popped {}", label(page)),
        NavigationEvent::PoppedToRoot { root, popped } => format!(
            "popped to root {} ({} removed)",
            label(root),
            popped.len()
        ),
        NavigationEvent::PageInserted { page, before } => {
            format!("inserted {} before {}", label(page), label(before))
        }
        NavigationEvent::PageRemoved(page) => format!("removed {}", label(page)),
        NavigationEvent::PropertyChanging { property, value } => {
            format!("{} changing from {}", property, describe_value(value))
        }
        NavigationEvent::PropertyChanged { property, value } => {
            format!("{} changed to {}", property, describe_value(value))
        }
    }
}
