//! Scene description for the banner
//!
//! The banner is a short, fixed list of drawable nodes in back-to-front
//! order. Nodes are addressed by [`NodeId`] so the animation can update a
//! layer without knowing how it is drawn.

use crate::args::BannerRequest;
use crate::style::{BannerStyle, Rgba};
use crate::timeline::{Frame, ScaleRange, Timeline};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// Dark strip behind the text
    Backdrop,
    /// Large blurred text layer
    Glow,
    /// Crisp text layer with a drop shadow
    Sharp,
}

/// Post-processing applied to a text layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    Blur { radius: f32 },
    DropShadow { color: Rgba, radius: f32 },
}

impl Effect {
    /// How far the effect spreads outside the glyphs
    pub fn spread(&self) -> f32 {
        match self {
            Effect::None => 0.0,
            Effect::Blur { radius } | Effect::DropShadow { radius, .. } => *radius,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Full-width strip centred vertically, painted with a horizontal gradient
    Strip { height: f32, stops: [(f32, Rgba); 4] },
    Text { font_size: f32, color: Rgba },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub effect: Effect,
    /// Uniform scale about the node's own centre
    pub scale: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    text: String,
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new(request: &BannerRequest, style: &BannerStyle) -> Self {
        let nodes = vec![
            Node {
                id: NodeId::Backdrop,
                kind: NodeKind::Strip {
                    height: style.strip_height,
                    stops: style.strip_stops(),
                },
                effect: Effect::None,
                scale: 1.0,
                opacity: 1.0,
            },
            Node {
                id: NodeId::Glow,
                kind: NodeKind::Text {
                    font_size: style.glow_font_size,
                    color: style.glow_color,
                },
                effect: Effect::Blur {
                    radius: style.glow_blur_radius,
                },
                scale: style.glow_scale_from,
                opacity: 1.0,
            },
            Node {
                id: NodeId::Sharp,
                kind: NodeKind::Text {
                    font_size: style.sharp_font_size,
                    color: style.sharp_color,
                },
                effect: Effect::DropShadow {
                    color: style.shadow_color,
                    radius: style.shadow_blur_radius,
                },
                scale: style.sharp_scale_from,
                opacity: 1.0,
            },
        ];

        Scene {
            text: request.display_text(),
            nodes,
        }
    }

    /// Timeline driving this scene's text layers
    pub fn timeline(style: &BannerStyle) -> Timeline {
        Timeline::new(
            ScaleRange::new(style.glow_scale_from, style.glow_scale_to),
            ScaleRange::new(style.sharp_scale_from, style.sharp_scale_to),
        )
    }

    /// Upper-cased text shared by both text layers
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Nodes back to front
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Write one animation frame into the text layers
    pub fn apply(&mut self, frame: &Frame) {
        if let Some(glow) = self.node_mut(NodeId::Glow) {
            glow.scale = frame.back_scale;
            glow.opacity = frame.opacity;
        }
        if let Some(sharp) = self.node_mut(NodeId::Sharp) {
            sharp.scale = frame.front_scale;
            sharp.opacity = frame.opacity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn scene(text: &str) -> Scene {
        Scene::new(&BannerRequest::new(text, false), &BannerStyle::default())
    }

    #[test]
    fn test_text_is_upper_cased() {
        assert_eq!(scene("you died").text(), "YOU DIED");
    }

    #[test]
    fn test_nodes_back_to_front() {
        let ids: Vec<NodeId> = scene("x").nodes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![NodeId::Backdrop, NodeId::Glow, NodeId::Sharp]);
    }

    #[test]
    fn test_initial_layers() {
        let scene = scene("x");

        let glow = scene.node(NodeId::Glow).unwrap();
        assert_eq!(glow.scale, 0.9);
        assert_eq!(glow.effect, Effect::Blur { radius: 15.0 });
        assert_eq!(glow.kind, NodeKind::Text { font_size: 78.0, color: [218, 165, 32, 100] });

        let sharp = scene.node(NodeId::Sharp).unwrap();
        assert_eq!(sharp.scale, 0.85);
        assert_eq!(
            sharp.effect,
            Effect::DropShadow { color: [0, 0, 0, 255], radius: 8.0 }
        );
        assert_eq!(sharp.kind, NodeKind::Text { font_size: 72.0, color: [218, 165, 32, 255] });
    }

    #[test]
    fn test_apply_frame() {
        let style = BannerStyle::default();
        let mut scene = scene("x");
        let frame = Scene::timeline(&style).sample(Duration::from_millis(2750));

        scene.apply(&frame);

        let glow = scene.node(NodeId::Glow).unwrap();
        let sharp = scene.node(NodeId::Sharp).unwrap();
        assert_eq!(glow.scale, frame.back_scale);
        assert_eq!(sharp.scale, frame.front_scale);
        assert_eq!(glow.opacity, frame.opacity);
        assert_eq!(sharp.opacity, frame.opacity);

        // backdrop is not animated
        let backdrop = scene.node(NodeId::Backdrop).unwrap();
        assert_eq!(backdrop.scale, 1.0);
        assert_eq!(backdrop.opacity, 1.0);
    }

    #[test]
    fn test_effect_spread() {
        assert_eq!(Effect::None.spread(), 0.0);
        assert_eq!(Effect::Blur { radius: 15.0 }.spread(), 15.0);
    }
}
