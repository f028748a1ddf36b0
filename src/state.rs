use std::path::Path;

use ring_resonator::config::SceneConfig;
use ring_resonator::export::export_spectrum;
use ring_resonator::scene::Scene;

use crate::color::CouplingColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Computed scene (None if the scene file failed to load).
    pub scene: Option<Scene>,

    /// Where the scene came from, shown in the top bar.
    pub source: String,

    /// Colours of the coupling comparison curves.
    pub coupling_colors: Option<CouplingColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            scene: None,
            source: String::new(),
            coupling_colors: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Resolve the scene from the command line / environment and build it.
    pub fn from_args_or_env() -> Self {
        let mut state = Self::default();
        match SceneConfig::from_args_or_env() {
            Ok((config, source)) => {
                state.source = source;
                state.set_config(config);
            }
            Err(e) => {
                log::error!("Failed to load scene: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
        state
    }

    /// Compute a scene from `config` and make it current.
    pub fn set_config(&mut self, config: SceneConfig) {
        match Scene::build(config) {
            Ok(scene) => self.set_scene(scene),
            Err(e) => {
                log::error!("Failed to build scene: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a computed scene and derive the colour assignment.
    pub fn set_scene(&mut self, scene: Scene) {
        let couplings: Vec<f64> = scene
            .coupling_curves
            .iter()
            .map(|c| c.self_coupling)
            .collect();
        self.coupling_colors = Some(CouplingColors::new(&couplings));
        self.scene = Some(scene);
        self.status_message = None;
    }

    /// Write the current spectrum; failures end up in the status line.
    pub fn export_to(&mut self, path: &Path) {
        let Some(scene) = &self.scene else {
            self.status_message = Some("Nothing to export".to_string());
            return;
        };
        match export_spectrum(path, scene) {
            Ok(()) => self.status_message = None,
            Err(e) => {
                log::error!("Failed to export spectrum: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_config_builds_scene_and_colours() {
        let mut state = AppState::default();
        state.set_config(SceneConfig::default());
        assert!(state.scene.is_some());
        assert!(state.status_message.is_none());
        assert_eq!(state.coupling_colors.as_ref().unwrap().legend_entries().len(), 3);
    }

    #[test]
    fn invalid_config_sets_status() {
        let mut state = AppState::default();
        let mut config = SceneConfig::default();
        config.resonator.self_coupling = 3.0;
        state.set_config(config);
        assert!(state.scene.is_none());
        assert!(state.status_message.as_deref().unwrap().contains("self_coupling"));
    }

    #[test]
    fn export_without_scene_reports() {
        let mut state = AppState::default();
        state.export_to(Path::new("unused.csv"));
        assert_eq!(state.status_message.as_deref(), Some("Nothing to export"));
    }

    #[test]
    fn export_errors_surface_in_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.set_config(SceneConfig::default());
        state.export_to(&dir.path().join("spectrum.txt"));
        assert!(state.status_message.as_deref().unwrap().contains("unsupported"));

        state.export_to(&dir.path().join("spectrum.csv"));
        assert!(state.status_message.is_none());
        assert!(dir.path().join("spectrum.csv").exists());
    }
}
