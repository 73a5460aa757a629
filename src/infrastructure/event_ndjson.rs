use crate::usecase::event::AppEvent;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub fn app_event_to_json(ev: &AppEvent) -> serde_json::Value {
    match ev {
        AppEvent::PhaseStarted { name } => json!({"type":"phase_started","name":name}),
        AppEvent::PhaseFinished { name } => json!({"type":"phase_finished","name":name}),
        AppEvent::ComponentDiscovered {
            component,
            root,
            members,
            membership,
        } => {
            json!({"type":"component_discovered","component":component,"root":root,"members":members,"membership":membership})
        }
        AppEvent::Done { total_components } => {
            json!({"type":"done","total_components":total_components})
        }
        AppEvent::Stopped { components_emitted } => {
            json!({"type":"stopped","components_emitted":components_emitted})
        }
        AppEvent::Finished { stats } => json!({"type":"finished","stats":stats}),
    }
}

pub fn spawn_ndjson_printer(mut rx: mpsc::Receiver<AppEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(ev) = rx.recv().await {
            let line = app_event_to_json(&ev);

            // NDJSON to stdout.
            println!("{line}");
        }
    })
}
