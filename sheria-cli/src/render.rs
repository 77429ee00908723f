use sheria_forms::{website::PageEffect, Alert, AlertKind, Effect};

fn print_alert(alert: &Alert) {
    match alert.kind {
        AlertKind::Success => println!("✅ {}", alert.message),
        AlertKind::Info => println!("ℹ️  {}", alert.message),
        AlertKind::Error => eprintln!("❌ {}", alert.message),
    }
}

/// Prints what a form handler wanted the user to see. Returns false when the
/// outcome was a failure.
pub fn effects<F>(effects: &[Effect<F>]) -> bool {
    let mut ok = true;
    for effect in effects {
        match effect {
            Effect::Message(message) => println!("{}", message),
            Effect::Alert(alert) => {
                ok &= alert.kind != AlertKind::Error;
                print_alert(alert);
            }
            Effect::Indicator { label, .. } => println!("{}", label),
            Effect::Progress { label, percent } => println!("{}: {:.0}%", label, percent),
            Effect::ShowStatement(view) if view.is_empty() => println!("No transactions."),
            Effect::ShowStatement(view) => print!("{}", view),
            Effect::CancelSave(reason) => {
                ok = false;
                eprintln!("❌ Not saved: {}", reason);
            }
            Effect::Prompt(prompt) => println!("{} (waiting for input)", prompt.title),
            _ => {}
        }
    }
    ok
}

pub fn page(effects: &[PageEffect]) -> bool {
    let mut ok = true;
    for effect in effects {
        match effect {
            PageEffect::DisableSubmit { label } => println!("{}", label),
            PageEffect::Alert(alert) => {
                ok &= alert.kind != AlertKind::Error;
                print_alert(alert);
            }
            PageEffect::ShowSelectedService(text) => println!("{}", text),
            _ => {}
        }
    }
    ok
}
