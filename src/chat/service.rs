use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use log::{debug, error};
use tokio::sync::RwLock;

use crate::api;
use crate::disclosure::{Disclosure, Placement};
use crate::lifecycle::Lifecycle;
use crate::modal::{self, Size, View};
use crate::session::Session;
use crate::store::{Collection, Refetcher};

use super::{Action, Chat, Error};

/// What the menu looks like right now, ready to be rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuView {
    pub chat: Chat,
    pub actions: Vec<Action>,
    pub open: bool,
    pub placement: Placement,
}

/// Overflow menu of a single chat row.
#[derive(Clone)]
pub struct ChatActionMenu {
    session: Arc<Session>,
    chat: Arc<RwLock<Chat>>,
    api: api::Service,
    chats: Collection<Chat>,
    refetcher: Refetcher,
    modal: modal::Service<Chat>,
    disclosure: Disclosure,
    pending: Arc<AtomicU8>,
    lifecycle: Lifecycle,
}

impl ChatActionMenu {
    pub fn new(
        session: Arc<Session>,
        chat: Chat,
        api: api::Service,
        chats: Collection<Chat>,
        refetcher: Refetcher,
        modal: modal::Service<Chat>,
    ) -> Self {
        Self {
            session,
            chat: Arc::new(RwLock::new(chat)),
            api,
            chats,
            refetcher,
            modal,
            disclosure: Disclosure::new(),
            pending: Arc::new(AtomicU8::new(0)),
            lifecycle: Lifecycle::new(),
        }
    }
}

// menu state
impl ChatActionMenu {
    pub async fn chat(&self) -> Chat {
        self.chat.read().await.clone()
    }

    pub async fn can_toggle_read(&self) -> bool {
        !self.chat.read().await.involves(self.session.user())
    }

    /// Visible entries in display order.
    pub async fn actions(&self) -> Vec<Action> {
        let chat = self.chat.read().await;

        let mut actions = Vec::with_capacity(3);
        if !chat.involves(self.session.user()) {
            actions.push(chat.read_toggle());
        }
        actions.push(Action::Archive);
        actions.push(Action::Delete);
        actions
    }

    pub fn is_open(&self) -> bool {
        self.disclosure.is_open()
    }

    pub fn toggle(&self) -> bool {
        self.disclosure.toggle()
    }

    pub fn placement(&self, trigger_bottom: f64, viewport_height: f64) -> Placement {
        Placement::measure(trigger_bottom, viewport_height)
    }

    pub async fn view(&self, trigger_bottom: f64, viewport_height: f64) -> MenuView {
        MenuView {
            chat: self.chat().await,
            actions: self.actions().await,
            open: self.is_open(),
            placement: self.placement(trigger_bottom, viewport_height),
        }
    }

    pub fn dispose(&self) {
        self.lifecycle.dispose();
    }
}

// actions
impl ChatActionMenu {
    pub async fn mark_read(&self) -> super::Result<()> {
        self.set_read(Action::MarkRead, true).await
    }

    pub async fn mark_unread(&self) -> super::Result<()> {
        self.set_read(Action::MarkUnread, false).await
    }

    pub async fn toggle_read(&self) -> super::Result<()> {
        let toggle = self.chat.read().await.read_toggle();
        match toggle {
            Action::MarkUnread => self.mark_unread().await,
            _ => self.mark_read().await,
        }
    }

    /// Archives the chat; the chat list is reloaded rather than spliced.
    pub async fn archive(&self) -> super::Result<()> {
        let chat = self.chat().await;
        let _pending = self.begin(Action::Archive)?;
        self.disclosure.close();

        debug!("archiving chat {}", chat.id);
        if let Err(e) = self.api.archive(&chat).await {
            error!("could not archive chat {}: {e}", chat.id);
            return Err(e.into());
        }

        self.refetcher.refetch().await;

        Ok(())
    }

    /// Asks the modal host to confirm deletion. Nothing is deleted here.
    pub async fn request_delete(&self) -> super::Result<()> {
        let _pending = self.begin(Action::Delete)?;
        self.disclosure.close();

        self.modal.open(modal::Request {
            view: View::DeleteChatConfirmation,
            size: Size::Lg,
            payload: self.chat().await,
        });

        Ok(())
    }
}

impl ChatActionMenu {
    async fn set_read(&self, action: Action, is_read: bool) -> super::Result<()> {
        let chat = self.chat().await;
        if chat.involves(self.session.user()) {
            debug!("{:?} hidden for chat {}", action, chat.id);
            return Err(Error::NotPermitted);
        }

        let _pending = self.begin(action)?;
        self.disclosure.close();

        debug!("{:?} on chat {}", action, chat.id);
        let result = if is_read {
            self.api.mark_read(&chat).await
        } else {
            self.api.mark_unread(&chat).await
        };

        if let Err(e) = result {
            error!("{:?} failed for chat {}: {e}", action, chat.id);
            return Err(e.into());
        }

        self.chats.map(|c| {
            if c.id == chat.id {
                c.with_read(is_read)
            } else {
                c.clone()
            }
        });

        if self.lifecycle.is_disposed() {
            debug!("chat menu for {} disposed, skipping own state", chat.id);
            return Ok(());
        }

        let mut own = self.chat.write().await;
        *own = own.with_read(is_read);

        Ok(())
    }

    fn begin(&self, action: Action) -> super::Result<Pending<'_>> {
        if self.lifecycle.is_disposed() {
            return Err(Error::Disposed);
        }

        let bit = action.bit();
        if self.pending.fetch_or(bit, Ordering::AcqRel) & bit != 0 {
            debug!("{:?} already in flight", action);
            return Err(Error::InFlight(action));
        }

        Ok(Pending {
            flags: &self.pending,
            bit,
        })
    }
}

/// Clears an action's in-flight bit when the call settles.
struct Pending<'a> {
    flags: &'a AtomicU8,
    bit: u8,
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        self.flags.fetch_and(!self.bit, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod test {
    use tokio::sync::Notify;
    use tokio::sync::mpsc::UnboundedReceiver;

    use crate::api::fake::{Call, FakeApi, FakeRefetch, Failure};
    use crate::chat::Id;
    use crate::modal::{ChannelOpener, Request};
    use crate::session::Theme;
    use crate::user;

    use super::*;

    struct Fixture {
        menu: ChatActionMenu,
        api: Arc<FakeApi>,
        chats: Collection<Chat>,
        refetch: Arc<FakeRefetch>,
        modal_rx: UnboundedReceiver<Request<Chat>>,
    }

    fn chat(id: &str, from_id: &str, is_read: bool) -> Chat {
        Chat::new(Id(id.into()), user::Id(from_id.into()), is_read)
    }

    fn fixture(auth: &str, target: Chat, api: FakeApi) -> Fixture {
        let api = Arc::new(api);
        let refetch = Arc::new(FakeRefetch::default());
        let chats = Collection::new(vec![
            chat("3", "1", false),
            target.clone(),
            chat("8", "2", true),
        ]);
        let (opener, modal_rx) = ChannelOpener::channel();

        let menu = ChatActionMenu::new(
            Arc::new(Session::new(user::Id(auth.into()), Theme::Light)),
            target,
            api.clone(),
            chats.clone(),
            refetch.clone(),
            Arc::new(opener),
        );

        Fixture {
            menu,
            api,
            chats,
            refetch,
            modal_rx,
        }
    }

    #[tokio::test]
    async fn should_list_read_toggle_for_unrelated_user() {
        let f = fixture("42", chat("5", "7", false), FakeApi::new());

        let actions = f.menu.actions().await;

        assert_eq!(
            actions,
            vec![Action::MarkRead, Action::Archive, Action::Delete]
        );
        assert!(f.menu.can_toggle_read().await);
    }

    #[tokio::test]
    async fn should_offer_mark_unread_for_read_chat() {
        let f = fixture("42", chat("5", "7", true), FakeApi::new());

        let actions = f.menu.actions().await;

        assert_eq!(actions[0], Action::MarkUnread);
    }

    #[tokio::test]
    async fn should_hide_read_toggle_from_originator() {
        let f = fixture("7", chat("5", "7", false), FakeApi::new());

        let actions = f.menu.actions().await;

        assert_eq!(actions, vec![Action::Archive, Action::Delete]);
        assert!(!f.menu.can_toggle_read().await);
    }

    #[tokio::test]
    async fn should_hide_read_toggle_from_counterpart() {
        let f = fixture("5", chat("5", "7", false), FakeApi::new());

        let actions = f.menu.actions().await;

        assert!(!actions.contains(&Action::MarkRead));
        assert!(!actions.contains(&Action::MarkUnread));
    }

    #[tokio::test]
    async fn should_mark_only_matching_chat_as_read() {
        let f = fixture("42", chat("5", "7", false), FakeApi::new());
        let before = f.chats.snapshot();

        f.menu.mark_read().await.unwrap();

        let after = f.chats.snapshot();
        assert_eq!(f.api.calls(), vec![Call::MarkRead(Id("5".into()))]);
        assert_eq!(after.len(), 3);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1], before[1].with_read(true));
        assert_eq!(after[2], before[2]);
        assert!(!before[1].is_read);
        assert!(f.menu.chat().await.is_read);
    }

    #[tokio::test]
    async fn should_mark_chat_as_unread() {
        let f = fixture("42", chat("5", "7", true), FakeApi::new());

        f.menu.toggle_read().await.unwrap();

        assert_eq!(f.api.calls(), vec![Call::MarkUnread(Id("5".into()))]);
        assert!(!f.chats.snapshot()[1].is_read);
        assert_eq!(f.menu.actions().await[0], Action::MarkRead);
    }

    #[tokio::test]
    async fn should_reject_read_toggle_without_calling_api() {
        let f = fixture("7", chat("5", "7", false), FakeApi::new());

        let result = f.menu.mark_read().await;

        assert!(matches!(result, Err(Error::NotPermitted)));
        assert!(f.api.calls().is_empty());
    }

    #[tokio::test]
    async fn should_leave_collection_untouched_on_failure() {
        let f = fixture("42", chat("5", "7", false), FakeApi::failing(Failure::NotFound));
        let before = f.chats.snapshot();

        let result = f.menu.mark_read().await;

        assert!(matches!(result, Err(Error::_Api(api::Error::NotFound))));
        assert!(Arc::ptr_eq(&before, &f.chats.snapshot()));
        assert!(!f.menu.chat().await.is_read);
    }

    #[tokio::test]
    async fn should_allow_retry_after_failure() {
        let f = fixture("42", chat("5", "7", false), FakeApi::failing(Failure::Network));

        assert!(f.menu.mark_read().await.is_err());
        f.api.recover();
        f.menu.mark_read().await.unwrap();

        assert_eq!(f.api.calls().len(), 2);
        assert!(f.chats.snapshot()[1].is_read);
    }

    #[tokio::test]
    async fn should_refetch_once_after_archive() {
        let f = fixture("42", chat("5", "7", false), FakeApi::new());
        let before = f.chats.snapshot();

        f.menu.archive().await.unwrap();

        assert_eq!(f.api.calls(), vec![Call::Archive(Id("5".into()))]);
        assert_eq!(f.refetch.count(), 1);
        assert!(Arc::ptr_eq(&before, &f.chats.snapshot()));
    }

    #[tokio::test]
    async fn should_not_refetch_when_archive_fails() {
        let f = fixture(
            "42",
            chat("5", "7", false),
            FakeApi::failing(Failure::Permission),
        );

        let result = f.menu.archive().await;

        assert!(matches!(result, Err(Error::_Api(api::Error::Permission))));
        assert_eq!(f.refetch.count(), 0);
    }

    #[tokio::test]
    async fn should_ignore_second_archive_while_first_in_flight() {
        let gate = Arc::new(Notify::new());
        let f = fixture("42", chat("5", "7", false), FakeApi::gated(gate.clone()));

        let (first, second, _) = futures::join!(f.menu.archive(), f.menu.archive(), async {
            gate.notify_one();
        });

        assert!(first.is_ok());
        assert!(matches!(second, Err(Error::InFlight(Action::Archive))));
        assert_eq!(f.api.calls().len(), 1);
        assert_eq!(f.refetch.count(), 1);
    }

    #[tokio::test]
    async fn should_ignore_opposite_read_toggle_while_first_in_flight() {
        let gate = Arc::new(Notify::new());
        let f = fixture("42", chat("5", "7", false), FakeApi::gated(gate.clone()));

        let (read, unread, _) = futures::join!(f.menu.mark_read(), f.menu.mark_unread(), async {
            gate.notify_one();
        });

        assert!(read.is_ok());
        assert!(matches!(unread, Err(Error::InFlight(Action::MarkUnread))));
        assert_eq!(f.api.calls(), vec![Call::MarkRead(Id("5".into()))]);
        assert!(f.chats.snapshot()[1].is_read);
        assert!(f.menu.chat().await.is_read);
    }

    #[tokio::test]
    async fn should_let_archive_run_beside_read_toggle() {
        let gate = Arc::new(Notify::new());
        let f = fixture("42", chat("5", "7", false), FakeApi::gated(gate.clone()));

        let (read, archive, _) = futures::join!(f.menu.mark_read(), f.menu.archive(), async {
            gate.notify_waiters();
        });

        assert!(read.is_ok());
        assert!(archive.is_ok());
        assert_eq!(f.api.calls().len(), 2);
    }

    #[tokio::test]
    async fn should_request_delete_confirmation_without_deleting() {
        let mut f = fixture("42", chat("5", "7", false), FakeApi::new());
        let before = f.chats.snapshot();

        f.menu.request_delete().await.unwrap();

        let request = f.modal_rx.try_recv().unwrap();
        assert_eq!(request.view, View::DeleteChatConfirmation);
        assert_eq!(request.size, Size::Lg);
        assert_eq!(request.payload, chat("5", "7", false));
        assert!(f.api.calls().is_empty());
        assert!(Arc::ptr_eq(&before, &f.chats.snapshot()));
    }

    #[tokio::test]
    async fn should_close_menu_when_action_chosen() {
        let f = fixture("42", chat("5", "7", false), FakeApi::new());

        assert!(f.menu.toggle());
        f.menu.archive().await.unwrap();

        assert!(!f.menu.is_open());
    }

    #[tokio::test]
    async fn should_skip_own_state_after_dispose() {
        let gate = Arc::new(Notify::new());
        let f = fixture("42", chat("5", "7", false), FakeApi::gated(gate.clone()));

        let (result, _) = futures::join!(f.menu.mark_read(), async {
            f.menu.dispose();
            gate.notify_one();
        });

        assert!(result.is_ok());
        assert!(f.chats.snapshot()[1].is_read);
        assert!(!f.menu.chat().await.is_read);
    }

    #[tokio::test]
    async fn should_reject_actions_after_dispose() {
        let f = fixture("42", chat("5", "7", false), FakeApi::new());
        f.menu.dispose();

        assert!(matches!(f.menu.archive().await, Err(Error::Disposed)));
        assert!(matches!(
            f.menu.request_delete().await,
            Err(Error::Disposed)
        ));
        assert!(f.api.calls().is_empty());
    }

    #[tokio::test]
    async fn should_build_view_with_current_placement() {
        let f = fixture("42", chat("5", "7", false), FakeApi::new());
        f.menu.toggle();

        let below = f.menu.view(200.0, 900.0).await;
        let above = f.menu.view(850.0, 900.0).await;

        assert!(below.open);
        assert_eq!(below.placement, Placement::Below);
        assert_eq!(above.placement, Placement::AboveRight);
        assert_eq!(below.actions, above.actions);
    }
}
