//! Sends commands to the backend and routes the results back into the
//! conversation and the inbox.

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::actions::{self, FollowUp};
use crate::api::{ApiClient, CommandRequest};
use crate::conversation::{Completion, Conversation, SubmitTicket};
use crate::error::{ApiError, SubmitRejected};
use crate::events::{ClientEvent, RefreshBus};
use crate::inbox::FetchTicket;
use crate::models::AssistantReply;
use crate::session;
use crate::tasks::TaskScope;

#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    client: ApiClient,
    refresh: RefreshBus,
}

impl CommandDispatcher {
    pub fn new(client: ApiClient, refresh: RefreshBus) -> Self {
        Self { client, refresh }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn refresh_bus(&self) -> &RefreshBus {
        &self.refresh
    }

    pub async fn dispatch(&self, request: &CommandRequest) -> Result<AssistantReply, ApiError> {
        info!(
            "Sending command ({} chars, correlation_id: {:?})",
            request.message.len(),
            request.correlation_id.as_ref().map(|id| id.as_str())
        );
        let result = self.client.send_command(request).await;
        match &result {
            Ok(reply) => info!("Command answered with '{}' reply", reply.kind()),
            Err(e) => warn!("Command failed: {}", e),
        }
        result
    }

    /// Apply a finished request to the conversation and publish an inbox
    /// refresh when the reply reported a deletion.
    pub fn settle(
        &self,
        conversation: &mut Conversation,
        ticket: SubmitTicket,
        result: Result<AssistantReply, ApiError>,
    ) -> Completion {
        let completion = conversation.complete(ticket, result);
        if completion.refresh_inbox {
            debug!("Reply reported a deletion, refreshing inbox");
            self.refresh.publish();
        }
        completion
    }

    /// Submit free text and wait for the reply.
    pub async fn submit(
        &self,
        conversation: &mut Conversation,
        text: &str,
    ) -> Result<Completion, SubmitRejected> {
        let ticket = conversation.begin_submit(text)?;
        let result = self.dispatch(ticket.request()).await;
        Ok(self.settle(conversation, ticket, result))
    }

    /// Confirm an open action and wait for the reply.
    pub async fn follow_up(
        &self,
        conversation: &mut Conversation,
        action: &FollowUp,
    ) -> Result<Completion, SubmitRejected> {
        let ticket = actions::resolve(conversation, action)?;
        let result = self.dispatch(ticket.request()).await;
        Ok(self.settle(conversation, ticket, result))
    }

    /// Run the request for `ticket` in the background; the result comes back
    /// as [`ClientEvent::CommandResolved`].
    pub fn spawn_command(
        &self,
        scope: &mut TaskScope,
        ticket: SubmitTicket,
        events: UnboundedSender<ClientEvent>,
    ) {
        let this = self.clone();
        scope.spawn(async move {
            let result = this.dispatch(ticket.request()).await;
            deliver(&events, ClientEvent::CommandResolved { ticket, result });
        });
    }

    pub fn spawn_identify(&self, scope: &mut TaskScope, events: UnboundedSender<ClientEvent>) {
        let client = self.client.clone();
        scope.spawn(async move {
            let identity = session::identify(&client).await;
            deliver(&events, ClientEvent::IdentityResolved(identity));
        });
    }

    pub fn spawn_fetch(
        &self,
        scope: &mut TaskScope,
        ticket: FetchTicket,
        events: UnboundedSender<ClientEvent>,
    ) {
        let client = self.client.clone();
        scope.spawn(async move {
            let result = client.list_emails().await;
            deliver(&events, ClientEvent::InboxLoaded { ticket, result });
        });
    }

    pub fn spawn_delete(
        &self,
        scope: &mut TaskScope,
        id: String,
        events: UnboundedSender<ClientEvent>,
    ) {
        let client = self.client.clone();
        scope.spawn(async move {
            info!("Deleting email {}", id);
            let result = client.delete_email(&id).await;
            deliver(&events, ClientEvent::EmailDeleted { id, result });
        });
    }
}

fn deliver(events: &UnboundedSender<ClientEvent>, event: ClientEvent) {
    if events.send(event).is_err() {
        debug!("Dropping client event, receiver is gone");
    }
}
