pub(crate) mod chart_session;
