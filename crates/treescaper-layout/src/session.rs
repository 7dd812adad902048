use crate::model::MeasuredNode;
use crate::params::LayoutParameters;
use crate::render::Theme;
use crate::svg::{SvgRenderOptions, render_svg};
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use crate::zoom::{Viewport, ZoomState};
use crate::{Result, layout_tree, position};
use std::sync::Arc;
use treescaper_core::{ScaperConfig, TreeNode};

/// An interactive canvas: one input tree, its config, the current zoom and pan, and the most
/// recent successful layout.
///
/// Zoom and config changes re-run the full layout. Panning only moves the root, so it re-assigns
/// positions on the cached tree. When a layout pass fails, the previous layout and parameters
/// stay in place so callers can keep drawing the last good frame.
#[derive(Clone)]
pub struct Scene {
    tree: TreeNode,
    config: ScaperConfig,
    zoom: ZoomState,
    viewport: Viewport,
    theme: Theme,
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
    params: LayoutParameters,
    layout: Option<MeasuredNode>,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("zoom", &self.zoom)
            .field("viewport", &self.viewport)
            .field("params", &self.params)
            .field("laid_out", &self.layout.is_some())
            .finish_non_exhaustive()
    }
}

impl Scene {
    /// Creates a scene using the [`DeterministicTextMeasurer`]. No layout runs until
    /// [`Scene::relayout`] is called.
    pub fn new(tree: TreeNode, config: ScaperConfig) -> Self {
        let zoom = ZoomState::from_config(&config.zoom);
        let viewport = Viewport::from_config(&config.window);
        let theme = Theme::from_config(&config);
        let params = LayoutParameters::from_config(&config, &zoom);
        Self {
            tree,
            config,
            zoom,
            viewport,
            theme,
            measurer: Arc::new(DeterministicTextMeasurer::default()),
            params,
            layout: None,
        }
    }

    pub fn with_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        self.measurer = measurer;
        self.layout = None;
        self
    }

    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    pub fn config(&self) -> &ScaperConfig {
        &self.config
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer.as_ref()
    }

    /// Parameters of the current layout (or of the next one, before the first pass).
    pub fn params(&self) -> &LayoutParameters {
        &self.params
    }

    /// The last successful layout, if any.
    pub fn layout(&self) -> Option<&MeasuredNode> {
        self.layout.as_ref()
    }

    /// Runs a full layout pass with parameters derived from the current config and zoom.
    pub fn relayout(&mut self) -> Result<&MeasuredNode> {
        let params = LayoutParameters::from_config(&self.config, &self.zoom);
        let measured = match layout_tree(
            &self.tree,
            &params,
            self.measurer.as_ref(),
            self.viewport.root_center(),
        ) {
            Ok(m) => m,
            Err(err) => {
                tracing::warn!(error = %err, "layout pass failed; keeping previous layout");
                return Err(err);
            }
        };
        self.params = params;
        Ok(self.layout.insert(measured))
    }

    pub fn zoom_in(&mut self) -> Result<bool> {
        self.change_zoom(ZoomState::zoom_in)
    }

    pub fn zoom_out(&mut self) -> Result<bool> {
        self.change_zoom(ZoomState::zoom_out)
    }

    pub fn set_zoom_level(&mut self, level: i32) -> Result<bool> {
        self.change_zoom(|z| z.set_level(level))
    }

    // Re-lays out only when the (clamped) level actually moved; reverts the level on failure.
    fn change_zoom(&mut self, apply: impl FnOnce(&mut ZoomState) -> bool) -> Result<bool> {
        let previous = self.zoom;
        if !apply(&mut self.zoom) {
            return Ok(false);
        }
        tracing::debug!(level = self.zoom.level(), scale = self.zoom.scale(), "zoom changed");
        if let Err(err) = self.relayout().map(|_| ()) {
            self.zoom = previous;
            return Err(err);
        }
        Ok(true)
    }

    /// Pans by whole scroll steps and moves the cached layout along with the root.
    pub fn scroll(&mut self, steps_x: f64, steps_y: f64) {
        self.viewport.scroll(steps_x, steps_y);
        let center = self.viewport.root_center();
        if let Some(layout) = self.layout.as_mut() {
            position::assign_positions(layout, center, &self.params);
        }
    }

    /// Replaces the input tree and lays it out. On failure the previous tree and layout remain.
    pub fn set_tree(&mut self, tree: TreeNode) -> Result<()> {
        let previous = std::mem::replace(&mut self.tree, tree);
        if let Err(err) = self.relayout().map(|_| ()) {
            self.tree = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Replaces the config, resetting zoom, pan and theme from it, and lays out again.
    pub fn set_config(&mut self, config: ScaperConfig) -> Result<()> {
        let previous = (
            std::mem::replace(&mut self.config, config),
            self.zoom,
            self.viewport,
            self.theme.clone(),
        );
        self.zoom = ZoomState::from_config(&self.config.zoom);
        self.viewport = Viewport::from_config(&self.config.window);
        self.theme = Theme::from_config(&self.config);
        if let Err(err) = self.relayout().map(|_| ()) {
            (self.config, self.zoom, self.viewport, self.theme) = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Draws the cached layout. `None` until a layout pass has succeeded.
    ///
    /// Without an explicit title the document is titled with the configured window name.
    pub fn render_svg(&self, options: &SvgRenderOptions) -> Option<String> {
        let layout = self.layout.as_ref()?;
        let mut options = options.clone();
        if options.title.is_none() {
            options.title = Some(self.config.window.name.clone());
        }
        Some(render_svg(
            layout,
            &self.params,
            &self.theme,
            self.measurer.as_ref(),
            &options,
        ))
    }
}
