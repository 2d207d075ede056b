// hiveq-core/src/application/testing.rs
//
// In-memory stand-ins for the JVM bridge.

use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::{ConnectionConfig, Query, QueryResult};
use crate::error::HiveqError;
use crate::infrastructure::error::{BridgeError, InfrastructureError};
use crate::ports::connector::{ConnectionOpener, Connector};

type EventLog = Rc<RefCell<Vec<String>>>;

pub(crate) struct ScriptedConnector {
    outcome: Result<QueryResult, String>,
    events: EventLog,
    closed: bool,
}

impl ScriptedConnector {
    pub(crate) fn returning(result: QueryResult) -> Self {
        Self {
            outcome: Ok(result),
            events: EventLog::default(),
            closed: false,
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            events: EventLog::default(),
            closed: false,
        }
    }

    pub(crate) fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

impl Connector for ScriptedConnector {
    fn execute(&mut self, query: &Query) -> Result<QueryResult, HiveqError> {
        self.events.borrow_mut().push(format!("execute:{}", query));
        self.outcome
            .clone()
            .map_err(|m| InfrastructureError::Query(m).into())
    }

    fn close(&mut self) -> Result<(), HiveqError> {
        if !self.closed {
            self.closed = true;
            self.events.borrow_mut().push("close".into());
        }
        Ok(())
    }

    fn engine_name(&self) -> &str {
        "scripted"
    }
}

pub(crate) struct ScriptedOpener {
    connect_error: Option<String>,
    outcome: Result<QueryResult, String>,
    events: EventLog,
}

impl ScriptedOpener {
    pub(crate) fn returning(result: QueryResult) -> Self {
        Self {
            connect_error: None,
            outcome: Ok(result),
            events: EventLog::default(),
        }
    }

    pub(crate) fn failing_query(message: &str) -> Self {
        Self {
            connect_error: None,
            outcome: Err(message.to_string()),
            events: EventLog::default(),
        }
    }

    pub(crate) fn unreachable(message: &str) -> Self {
        Self {
            connect_error: Some(message.to_string()),
            outcome: Ok(QueryResult::default()),
            events: EventLog::default(),
        }
    }

    pub(crate) fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

impl ConnectionOpener for ScriptedOpener {
    fn open<'a>(&'a self, config: &ConnectionConfig) -> Result<Box<dyn Connector + 'a>, HiveqError> {
        if let Some(message) = &self.connect_error {
            return Err(InfrastructureError::from(BridgeError::Connect {
                target: config.display_target(),
                message: message.clone(),
            })
            .into());
        }
        self.events.borrow_mut().push("open".into());
        Ok(Box::new(ScriptedConnector {
            outcome: self.outcome.clone(),
            events: Rc::clone(&self.events),
            closed: false,
        }))
    }
}
