//! Schedule projections for the CRM client: a month-grouped agenda and a
//! Sunday-to-Saturday week strip, plus the calendar math they share.

pub mod calendar;
