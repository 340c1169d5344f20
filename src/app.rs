use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::Config;
use crate::system::memory::{FreeMemorySource, MemorySnapshot};
use crate::system::sample::CpuSample;
use crate::system::sampler::{CpuTimeSource, Sampler};
use crate::system::utilization::{UtilizationVector, utilization};

/// Owns the polling cycle state: the sampler, the single retained previous
/// sample, and the most recent derived figures.
pub struct App<S: CpuTimeSource> {
    pub running: bool,
    pub show_per_core: bool,
    pub utilization: UtilizationVector,
    pub memory: MemorySnapshot,
    sampler: Sampler<S>,
    previous: CpuSample,
    free_source: Box<dyn FreeMemorySource>,
}

impl<S: CpuTimeSource> App<S> {
    /// Primes the cycle with an initial capture; the utilization vector
    /// stays at zero until the first tick produces a delta.
    pub fn new(
        config: &Config,
        mut sampler: Sampler<S>,
        total_memory_bytes: u64,
        mut free_source: Box<dyn FreeMemorySource>,
    ) -> Self {
        let previous = sampler.capture();
        let core_count = sampler.core_count();
        let memory = MemorySnapshot::capture(total_memory_bytes, free_source.as_mut());
        App {
            running: true,
            show_per_core: config.display.show_per_core,
            utilization: UtilizationVector::idle(core_count),
            memory,
            sampler,
            previous,
            free_source,
        }
    }

    pub fn core_count(&self) -> usize {
        self.sampler.core_count()
    }

    /// Runs one polling cycle: capture, diff against the previous sample,
    /// rotate the slots, refresh the memory figures.
    pub fn refresh_data(&mut self) {
        let current = self.sampler.capture();
        self.utilization = utilization(&self.previous, &current);
        self.previous = current;
        self.memory = MemorySnapshot::capture(self.memory.total_bytes, self.free_source.as_mut());
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char('c') => Action::TogglePerCore,
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Refresh => self.refresh_data(),
            Action::TogglePerCore => self.show_per_core = !self.show_per_core,
            Action::None => {}
        }
    }
}
