use crate::constants::FONT_SIZE;
use crate::scene::DrawCmd;
use web_sys as web;

/// Canvas 2D backend for the scene draw list.
pub struct Painter {
    ctx: web::CanvasRenderingContext2d,
}

impl Painter {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Clear the whole backing store and set up CSS-pixel drawing.
    pub fn begin(&self, canvas: &web::HtmlCanvasElement, dpr: f64) {
        _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx
            .clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
        _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        self.ctx.set_font(&format!("{}px sans-serif", FONT_SIZE));
        self.ctx.set_global_alpha(1.0);
    }

    pub fn paint(&self, cmds: &[DrawCmd]) {
        let ctx = &self.ctx;
        for cmd in cmds {
            match cmd {
                DrawCmd::FillRect { x, y, w, h, color } => {
                    ctx.set_fill_style_str(&color.css());
                    ctx.fill_rect(*x, *y, *w, *h);
                }
                DrawCmd::StrokeRect {
                    x,
                    y,
                    w,
                    h,
                    color,
                    line_width,
                } => {
                    ctx.set_stroke_style_str(&color.css());
                    ctx.set_line_width(*line_width);
                    ctx.stroke_rect(*x, *y, *w, *h);
                }
                DrawCmd::Text { x, y, text } => {
                    ctx.set_fill_style_str("black");
                    _ = ctx.fill_text(text, *x, *y);
                }
                DrawCmd::Circle {
                    x,
                    y,
                    radius,
                    color,
                    alpha,
                } => {
                    ctx.begin_path();
                    _ = ctx.arc(*x, *y, *radius, 0.0, std::f64::consts::TAU);
                    ctx.set_global_alpha(*alpha as f64);
                    ctx.set_fill_style_str(&color.css());
                    ctx.fill();
                    ctx.set_global_alpha(1.0);
                }
                DrawCmd::Line {
                    from,
                    to,
                    color,
                    line_width,
                } => {
                    ctx.begin_path();
                    ctx.move_to(from[0], from[1]);
                    ctx.line_to(to[0], to[1]);
                    ctx.set_stroke_style_str(&color.css());
                    ctx.set_line_width(*line_width);
                    ctx.stroke();
                }
                DrawCmd::Polygon { points, color } => {
                    let Some((first, rest)) = points.split_first() else {
                        continue;
                    };
                    ctx.begin_path();
                    ctx.move_to(first[0], first[1]);
                    for p in rest {
                        ctx.line_to(p[0], p[1]);
                    }
                    ctx.close_path();
                    ctx.set_fill_style_str(&color.css());
                    ctx.fill();
                }
            }
        }
    }
}
