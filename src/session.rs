//! Shared fetch state and its transition rules.

use crate::api::{Filter, Gender};
use crate::error::Error;
use crate::fetch::{ClientKind, Fetched, Outcome};

/// State shared by every fetch entry point: the filter, the busy flag,
/// the shared error slot, and one outcome slot per transport path.
///
/// All mutation goes through [`Session::begin`], [`Session::apply`] and
/// the filter setters. Keeping the transitions here is what makes the
/// mutual-exclusion and slot-stamping rules checkable without a
/// terminal attached.
#[derive(Debug)]
pub struct Session {
    filter: Filter,
    busy: bool,
    error: Option<String>,
    reqwest: Option<Outcome>,
    ureq: Option<Outcome>,
}

impl Session {
    pub fn new(filter: Filter) -> Self {
        Session {
            filter,
            busy: false,
            error: None,
            reqwest: None,
            ureq: None,
        }
    }

    /// Try to start a fetch cycle.
    ///
    /// While another cycle is in flight this returns false and changes
    /// nothing; the caller drops the trigger. Otherwise the busy flag is
    /// taken and the error slot cleared.
    pub fn begin(&mut self) -> bool {
        if self.busy {
            log::debug!("fetch trigger dropped: a cycle is already in flight");
            return false;
        }
        self.busy = true;
        self.error = None;
        true
    }

    /// Record the completion of the in-flight cycle.
    ///
    /// Success overwrites the stamped outcome slot(s). Failure stores
    /// the classified message and leaves every outcome slot untouched,
    /// so previously displayed results survive failed cycles. The busy
    /// flag is released either way.
    pub fn apply(&mut self, result: Result<Fetched, Error>) {
        match result {
            Ok(Fetched::Single {
                kind: ClientKind::Reqwest,
                outcome,
            }) => self.reqwest = Some(outcome),
            Ok(Fetched::Single {
                kind: ClientKind::Ureq,
                outcome,
            }) => self.ureq = Some(outcome),
            Ok(Fetched::Pair { reqwest, ureq }) => {
                self.reqwest = Some(reqwest);
                self.ureq = Some(ureq);
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        self.busy = false;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn outcome(&self, kind: ClientKind) -> Option<&Outcome> {
        match kind {
            ClientKind::Reqwest => self.reqwest.as_ref(),
            ClientKind::Ureq => self.ureq.as_ref(),
        }
    }

    /// Set the gender field, reporting whether the value changed. Only a
    /// real change should enqueue the reactive refetch.
    pub fn set_gender(&mut self, gender: Gender) -> bool {
        if self.filter.gender == gender {
            return false;
        }
        self.filter.gender = gender;
        true
    }

    /// Set the country field, reporting whether the value changed.
    pub fn set_country(&mut self, country: impl Into<String>) -> bool {
        let country = country.into();
        if self.filter.country == country {
            return false;
        }
        self.filter.country = country;
        true
    }
}
