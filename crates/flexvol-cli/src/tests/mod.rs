//! Unit and behavioural tests for the dispatcher.

mod support;
