mod terminal_notifier;

pub use terminal_notifier::TerminalNotifier;
