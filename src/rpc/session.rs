use std::io;
use std::thread;
use std::time::{Duration, Instant};

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use super::error::{RpcError, RpcResult};
use super::request::PendingRequest;
use super::transport::{Connector, TcpConnector};
use super::wire::{Method, SESSION_ID_HEADER, TASK_FIELDS, Tag, decode_reply, split_reply};
use crate::model::registry::Registry;

/// A state-changing request sent once, outside the polling cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Stop(i64),
    Start(i64),
    Verify(i64),
    Remove(i64),
    /// Upload cap in KB/s
    UploadLimit(u64),
    /// Download cap in KB/s
    DownloadLimit(u64),
}

impl Command {
    pub fn method(self) -> Method {
        match self {
            Command::Stop(_) => Method::TorrentStop,
            Command::Start(_) => Method::TorrentStart,
            Command::Verify(_) => Method::TorrentVerify,
            Command::Remove(_) => Method::TorrentRemove,
            Command::UploadLimit(_) | Command::DownloadLimit(_) => Method::SessionSet,
        }
    }

    pub fn arguments(self) -> Value {
        match self {
            Command::Stop(id) | Command::Start(id) | Command::Verify(id) | Command::Remove(id) => {
                json!({ "ids": [id] })
            }
            Command::UploadLimit(limit) => json!({
                "speed-limit-up": limit,
                "speed-limit-up-enabled": true,
            }),
            Command::DownloadLimit(limit) => json!({
                "speed-limit-down": limit,
                "speed-limit-down-enabled": true,
            }),
        }
    }

    /// Commands whose effect shows up in the task list
    pub fn changes_task_list(self) -> bool {
        !matches!(self, Command::UploadLimit(_) | Command::DownloadLimit(_))
    }
}

/// Result of waiting for the daemon to catch up with a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    Converged,
    TimedOut,
}

/// What happened to one complete reply.
enum Outcome {
    Applied(Tag),
    /// The daemon handed out a session id; send the request again
    Resend,
    Dropped,
}

/// Polling engine for the daemon's RPC endpoint.
///
/// Owns the three recurring requests (task list, statistics, session
/// settings) plus any one-shot commands still waiting for their reply.
/// Every request uses a fresh connection and never blocks on reads.
pub struct Session<K: Connector = TcpConnector> {
    connector: K,
    rpc_path: String,
    session_id: Option<String>,
    recurring: Vec<PendingRequest<K::Conn>>,
    commands: Vec<PendingRequest<K::Conn>>,
}

impl<K: Connector> Session<K> {
    pub fn new(connector: K, rpc_path: impl Into<String>) -> Self {
        let recurring = vec![
            PendingRequest::new(
                Method::TorrentGet,
                Tag::TaskList,
                Some(json!({ "fields": TASK_FIELDS })),
            ),
            PendingRequest::new(Method::SessionStats, Tag::Stats, None),
            PendingRequest::new(Method::SessionGet, Tag::Config, None),
        ];
        Session {
            connector,
            rpc_path: rpc_path.into(),
            session_id: None,
            recurring,
            commands: Vec::new(),
        }
    }

    pub fn endpoint(&self) -> String {
        self.connector.endpoint()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Number of commands whose reply has not arrived yet
    pub fn outstanding_commands(&self) -> usize {
        self.commands.len()
    }

    /// One polling pass. Every recurring request untouched for at least
    /// `min_delay` is either dispatched (when idle) or read (when in
    /// flight); outstanding commands are always read. Returns true when a
    /// task-list reply was applied during this pass.
    pub fn update(&mut self, registry: &mut Registry, min_delay: Duration) -> RpcResult<bool> {
        let now = Instant::now();
        let mut list_refreshed = false;

        for req in &mut self.recurring {
            if let Some(last) = req.last_dispatch
                && now.duration_since(last) < min_delay
            {
                continue;
            }
            req.last_dispatch = Some(now);

            if req.is_idle() {
                debug!(method = req.method.as_str(), "dispatching");
                req.dispatch(
                    &mut self.connector,
                    &self.rpc_path,
                    self.session_id.as_deref(),
                )
                .map_err(|e| connection_error(&self.connector, e))?;
                continue;
            }

            let Some(raw) = req.poll().map_err(|e| connection_error(&self.connector, e))? else {
                continue;
            };
            match handle_reply(&raw, req.tag, &mut self.session_id, registry)? {
                Outcome::Applied(Tag::TaskList) => list_refreshed = true,
                Outcome::Applied(_) | Outcome::Dropped => {}
                Outcome::Resend => req.last_dispatch = None,
            }
        }

        self.poll_commands(registry)?;
        Ok(list_refreshed)
    }

    /// Fire a one-shot command. Its reply is consumed by later updates;
    /// nothing here waits for the daemon to act on it.
    pub fn send_command(&mut self, command: Command) -> RpcResult<()> {
        let mut req = PendingRequest::new(
            command.method(),
            Tag::Command,
            Some(command.arguments()),
        );
        req.dispatch(
            &mut self.connector,
            &self.rpc_path,
            self.session_id.as_deref(),
        )
        .map_err(|e| connection_error(&self.connector, e))?;
        info!(?command, "command sent");
        self.commands.push(req);
        Ok(())
    }

    /// Poll until two task-list refreshes have been applied, so the list
    /// reflects a command the daemon applies asynchronously. Gives up
    /// after `timeout`, sleeping `interval` between passes.
    pub fn wait_for_list_refresh(
        &mut self,
        registry: &mut Registry,
        timeout: Duration,
        interval: Duration,
    ) -> RpcResult<Convergence> {
        let started = Instant::now();
        let mut refreshes = 0;
        while refreshes < 2 {
            if self.update(registry, Duration::ZERO)? {
                refreshes += 1;
                continue;
            }
            if started.elapsed() >= timeout {
                warn!(?timeout, refreshes, "task list did not converge");
                return Ok(Convergence::TimedOut);
            }
            thread::sleep(interval);
        }
        Ok(Convergence::Converged)
    }

    /// Poll until every recurring reply kind has been applied once.
    pub fn prime(
        &mut self,
        registry: &mut Registry,
        timeout: Duration,
        interval: Duration,
    ) -> RpcResult<()> {
        let started = Instant::now();
        loop {
            self.update(registry, Duration::ZERO)?;
            if registry.is_primed() {
                info!(
                    endpoint = %self.endpoint(),
                    tasks = registry.tasks().len(),
                    "session primed"
                );
                return Ok(());
            }
            if started.elapsed() >= timeout {
                return Err(RpcError::Timeout {
                    what: "initial daemon state",
                    waited: started.elapsed(),
                });
            }
            thread::sleep(interval);
        }
    }

    fn poll_commands(&mut self, registry: &mut Registry) -> RpcResult<()> {
        let mut i = 0;
        while i < self.commands.len() {
            let req = &mut self.commands[i];
            let Some(raw) = req.poll().map_err(|e| connection_error(&self.connector, e))? else {
                i += 1;
                continue;
            };
            match handle_reply(&raw, req.tag, &mut self.session_id, registry)? {
                Outcome::Resend => {
                    req.dispatch(
                        &mut self.connector,
                        &self.rpc_path,
                        self.session_id.as_deref(),
                    )
                    .map_err(|e| connection_error(&self.connector, e))?;
                    i += 1;
                }
                Outcome::Applied(_) | Outcome::Dropped => {
                    debug!(method = req.method.as_str(), "command answered");
                    self.commands.remove(i);
                }
            }
        }
        Ok(())
    }
}

fn connection_error<K: Connector>(connector: &K, source: io::Error) -> RpcError {
    RpcError::Connection {
        endpoint: connector.endpoint(),
        source,
    }
}

fn handle_reply(
    raw: &[u8],
    tag: Tag,
    session_id: &mut Option<String>,
    registry: &mut Registry,
) -> RpcResult<Outcome> {
    let reply = split_reply(raw)?;
    match reply.status {
        Some(409) => {
            let id = reply.header(SESSION_ID_HEADER).ok_or_else(|| {
                RpcError::Protocol("409 reply without a session id".to_string())
            })?;
            info!(session_id = id, "daemon issued session id");
            *session_id = Some(id.to_string());
            return Ok(Outcome::Resend);
        }
        Some(code) if !(200..300).contains(&code) => {
            return Err(RpcError::Protocol(format!("daemon answered HTTP {}", code)));
        }
        _ => {}
    }

    match decode_reply(reply.body, tag) {
        Ok(decoded) => {
            debug!(tag = tag.id(), "reply applied");
            Ok(Outcome::Applied(registry.apply(decoded)))
        }
        Err(RpcError::Application { tag, result }) => {
            // retried on the request's next cadence tick
            warn!(tag, %result, "daemon refused request");
            Ok(Outcome::Dropped)
        }
        Err(e) => Err(e),
    }
}
