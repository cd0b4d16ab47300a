//! Document Renderer — lays a `ResumeRecord` out as a single-column PDF.
//!
//! Layout: centered name and contact header, then EDUCATION, SKILLS and
//! WORK EXPERIENCE sections, each headed by a bold title over a thin rule.
//! Dates sit at a right-aligned tab stop on the text edge. Text runs use the
//! base-14 Helvetica faces, measured with `font_metrics` for alignment and
//! wrapping. Pages are appended when the cursor reaches the bottom margin.
//!
//! `printpdf` documents are not `Send`; call from `spawn_blocking`.

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};

use crate::errors::AppError;
use crate::render::font_metrics::{metrics, Face, PT_TO_MM};
use crate::resume::models::{EducationEntry, ExperienceEntry, ResumeRecord, Skills};

const LAYER_NAME: &str = "Resume";
const LINE_SPACING: f32 = 1.2;
const BULLET_GLYPH: &str = "-";
const BULLET_INDENT_MM: f32 = 2.5;
const BULLET_TEXT_INDENT_MM: f32 = 6.0;
const RULE_THICKNESS_PT: f32 = 0.75;

/// Page geometry and type sizes.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
    pub name_pt: f32,
    pub heading_pt: f32,
    pub body_pt: f32,
}

impl PageLayout {
    /// Usable width between the side margins (the right tab stop sits here).
    pub fn text_width_mm(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }
}

/// US letter, 0.5" margins, 16pt name, 11pt headings, 10.5pt body.
pub fn default_page_layout() -> PageLayout {
    PageLayout {
        width_mm: 215.9,
        height_mm: 279.4,
        margin_mm: 12.7,
        name_pt: 16.0,
        heading_pt: 11.0,
        body_pt: 10.5,
    }
}

/// Renders the resume and returns the PDF bytes.
pub fn render_resume(resume: &ResumeRecord, layout: &PageLayout) -> Result<Vec<u8>, AppError> {
    let title = if resume.full_name.is_empty() {
        "Resume".to_string()
    } else {
        format!("{} - Resume", resume.full_name)
    };
    let mut pen = Pen::new(&title, layout)?;

    pen.header(&resume.full_name, &resume.contact_info);

    if !resume.education.is_empty() {
        pen.section_heading("EDUCATION");
        for edu in &resume.education {
            pen.education_row(edu);
        }
    }

    if !resume.skills.is_empty() {
        pen.section_heading("SKILLS");
        pen.skills(&resume.skills);
        pen.space(8.0);
    }

    if !resume.experience.is_empty() {
        pen.section_heading("WORK EXPERIENCE");
        for job in &resume.experience {
            pen.experience_row(job);
        }
    }

    pen.finish()
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

/// Drawing cursor over the current page layer. `y` is the distance from the
/// page bottom in millimetres, moving downwards as lines are placed.
struct Pen<'a> {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    layout: &'a PageLayout,
    y: f32,
}

impl<'a> Pen<'a> {
    fn new(title: &str, layout: &'a PageLayout) -> Result<Self, AppError> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm(layout.width_mm),
            Mm(layout.height_mm),
            LAYER_NAME,
        );
        let layer = doc.get_page(page).get_layer(layer);

        let font = |builtin: BuiltinFont| {
            doc.add_builtin_font(builtin)
                .map_err(|e| AppError::Render(format!("Failed to load font: {e}")))
        };
        let fonts = Fonts {
            regular: font(BuiltinFont::Helvetica)?,
            bold: font(BuiltinFont::HelveticaBold)?,
            oblique: font(BuiltinFont::HelveticaOblique)?,
        };

        Ok(Self {
            y: layout.height_mm - layout.margin_mm,
            doc,
            layer,
            fonts,
            layout,
        })
    }

    fn finish(self) -> Result<Vec<u8>, AppError> {
        let mut writer = BufWriter::new(Vec::new());
        self.doc
            .save(&mut writer)
            .map_err(|e| AppError::Render(format!("Failed to write PDF: {e}")))?;
        writer
            .into_inner()
            .map_err(|e| AppError::Render(format!("Failed to flush PDF: {e}")))
    }

    // ── cursor ──────────────────────────────────────────────────────────────

    fn left(&self) -> f32 {
        self.layout.margin_mm
    }

    fn right(&self) -> f32 {
        self.layout.width_mm - self.layout.margin_mm
    }

    /// Moves to the next baseline for text of `size_pt`, starting a new page
    /// if it would cross the bottom margin.
    fn next_line(&mut self, size_pt: f32) -> f32 {
        let height = size_pt * LINE_SPACING * PT_TO_MM;
        if self.y - height < self.layout.margin_mm {
            let (page, layer) = self.doc.add_page(
                Mm(self.layout.width_mm),
                Mm(self.layout.height_mm),
                LAYER_NAME,
            );
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = self.layout.height_mm - self.layout.margin_mm;
        }
        self.y -= height;
        self.y
    }

    fn space(&mut self, pt: f32) {
        self.y -= pt * PT_TO_MM;
    }

    // ── primitives ──────────────────────────────────────────────────────────

    fn font(&self, face: Face) -> &IndirectFontRef {
        match face {
            Face::Regular => &self.fonts.regular,
            Face::Bold => &self.fonts.bold,
            Face::Oblique => &self.fonts.oblique,
        }
    }

    fn text(&self, text: &str, size_pt: f32, face: Face, x: f32, y: f32) {
        if text.is_empty() {
            return;
        }
        self.layer
            .use_text(text, size_pt, Mm(x), Mm(y), self.font(face));
    }

    fn centered(&self, text: &str, size_pt: f32, face: Face, y: f32) {
        let width = metrics(face).width_mm(text, size_pt);
        let x = ((self.layout.width_mm - width) / 2.0).max(self.left());
        self.text(text, size_pt, face, x, y);
    }

    /// Right tab stop at the text edge.
    fn right_aligned(&self, text: &str, size_pt: f32, face: Face, y: f32) {
        let width = metrics(face).width_mm(text, size_pt);
        self.text(text, size_pt, face, self.right() - width, y);
    }

    fn rule(&self, y: f32) {
        let line = Line {
            points: vec![
                (Point::new(Mm(self.left()), Mm(y)), false),
                (Point::new(Mm(self.right()), Mm(y)), false),
            ],
            is_closed: false,
        };
        self.layer.set_outline_thickness(RULE_THICKNESS_PT);
        self.layer.add_line(line);
    }

    // ── blocks ──────────────────────────────────────────────────────────────

    fn header(&mut self, name: &str, contact: &str) {
        let name_pt = self.layout.name_pt;
        let body_pt = self.layout.body_pt;

        let y = self.next_line(name_pt);
        self.centered(name, name_pt, Face::Bold, y);

        let lines = metrics(Face::Regular).wrap(contact, body_pt, self.layout.text_width_mm());
        for line in &lines {
            let y = self.next_line(body_pt);
            self.centered(line, body_pt, Face::Regular, y);
        }
        self.space(12.0);
    }

    fn section_heading(&mut self, title: &str) {
        let heading_pt = self.layout.heading_pt;
        let y = self.next_line(heading_pt);
        self.text(title, heading_pt, Face::Bold, self.left(), y);
        self.rule(y - 1.2);
        self.space(4.0);
    }

    fn education_row(&mut self, edu: &EducationEntry) {
        let body_pt = self.layout.body_pt;
        let y = self.next_line(body_pt);
        self.text(&edu.school, body_pt, Face::Bold, self.left(), y);
        self.right_aligned(&edu.year, body_pt, Face::Regular, y);

        let left = self.left();
        let width = self.layout.text_width_mm();
        self.wrapped(&edu.degree, Face::Regular, left, width);
        self.space(8.0);
    }

    fn skills(&mut self, skills: &Skills) {
        let body_pt = self.layout.body_pt;
        for (category, value) in skills.iter() {
            let label = format!("{category}: ");
            let label_width = metrics(Face::Bold).width_mm(&label, body_pt);
            let indent = self.left() + label_width;
            let available = self.layout.text_width_mm() - label_width;

            let wrapped = metrics(Face::Regular).wrap(value, body_pt, available);
            let y = self.next_line(body_pt);
            self.text(&label, body_pt, Face::Bold, self.left(), y);

            let mut lines = wrapped.iter();
            if let Some(first) = lines.next() {
                self.text(first, body_pt, Face::Regular, indent, y);
            }
            for line in lines {
                let y = self.next_line(body_pt);
                self.text(line, body_pt, Face::Regular, indent, y);
            }
        }
    }

    fn experience_row(&mut self, job: &ExperienceEntry) {
        let heading_pt = self.layout.heading_pt;
        let body_pt = self.layout.body_pt;

        let y = self.next_line(heading_pt);
        self.text(&job.role, heading_pt, Face::Bold, self.left(), y);
        self.right_aligned(&job.duration, body_pt, Face::Regular, y);

        let y = self.next_line(body_pt);
        self.text(&job.company, body_pt, Face::Oblique, self.left(), y);
        if !job.location.is_empty() {
            let x = self.left() + metrics(Face::Oblique).width_mm(&job.company, body_pt);
            let separator = if job.company.is_empty() { "" } else { " | " };
            let location = format!("{separator}{}", job.location);
            self.text(&location, body_pt, Face::Regular, x, y);
        }
        self.space(2.0);

        let bullet_x = self.left() + BULLET_INDENT_MM;
        let text_x = self.left() + BULLET_TEXT_INDENT_MM;
        let text_width = self.layout.text_width_mm() - BULLET_TEXT_INDENT_MM;
        for bullet in &job.enhanced_bullets {
            let lines = metrics(Face::Regular).wrap(bullet, body_pt, text_width);
            for (i, line) in lines.iter().enumerate() {
                let y = self.next_line(body_pt);
                if i == 0 {
                    self.text(BULLET_GLYPH, body_pt, Face::Regular, bullet_x, y);
                }
                self.text(line, body_pt, Face::Regular, text_x, y);
            }
        }
        self.space(6.0);
    }

    fn wrapped(&mut self, text: &str, face: Face, x: f32, width: f32) {
        let body_pt = self.layout.body_pt;
        for line in metrics(face).wrap(text, body_pt, width) {
            let y = self.next_line(body_pt);
            self.text(&line, body_pt, face, x, y);
        }
    }
}
