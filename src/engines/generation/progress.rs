use super::evolution_engine::ProgressCallback;
use std::sync::mpsc::Sender;

/// Ignores every event
pub struct NoopProgressCallback;

impl ProgressCallback for NoopProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_agent_evaluated(&mut self, _agent_num: usize, _total: usize) {}

    fn on_generation_complete(&mut self, _generation: usize, _best_score: f64, _population_size: usize) {}
}

pub struct LoggingProgressCallback;

impl ProgressCallback for LoggingProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::info!("Generation {} starting...", generation + 1);
    }

    fn on_agent_evaluated(&mut self, agent_num: usize, total: usize) {
        if agent_num % 10 == 0 || agent_num == total {
            log::debug!("  Evaluated {}/{} agents", agent_num, total);
        }
    }

    fn on_generation_complete(&mut self, generation: usize, best_score: f64, population_size: usize) {
        log::info!(
            "Generation {} complete. Best score: {:.4}, population: {}",
            generation + 1,
            best_score,
            population_size
        );
    }
}

// For handing progress to another thread (e.g. a UI)
pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    AgentEvaluated { current: usize, total: usize },
    GenerationComplete { generation: usize, best_score: f64, population_size: usize },
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_agent_evaluated(&mut self, agent_num: usize, total: usize) {
        let _ = self.sender.send(ProgressMessage::AgentEvaluated {
            current: agent_num,
            total,
        });
    }

    fn on_generation_complete(&mut self, generation: usize, best_score: f64, population_size: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            best_score,
            population_size,
        });
    }
}
