use actix_web::{error, web, HttpRequest, HttpResponse};

use crate::data::{ParentalInvolvement, PredictionForm};
use crate::error::PredictionError;
use crate::model::{self, Classifier, Prediction};

pub type Outcome = Result<Prediction, PredictionError>;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(form_error_handler))
        .route("/", web::get().to(serve_homepage))
        .route("/", web::post().to(submit_prediction));
}

async fn serve_homepage() -> HttpResponse {
    html(render_page(&PredictionForm::default(), None))
}

async fn submit_prediction(
    form: web::Form<PredictionForm>,
    classifier: web::Data<dyn Classifier>,
) -> HttpResponse {
    let form = form.into_inner();
    let outcome = model::predict(classifier.get_ref(), &form);

    match &outcome {
        Ok(prediction) => log::debug!(
            "predicted grade class {} (index {})",
            prediction.label(),
            prediction.class_index
        ),
        Err(e) => log::debug!("prediction failed: {e}"),
    }

    html(render_page(&form, Some(&outcome)))
}

// A body that can't be decoded still gets the page back, with the
// failure shown where the result would have been.
fn form_error_handler(err: error::UrlencodedError, _req: &HttpRequest) -> error::Error {
    log::debug!("rejected form body: {err}");
    let outcome: Outcome = Err(PredictionError::InvalidForm(err.to_string()));
    let response = html(render_page(&PredictionForm::default(), Some(&outcome)));
    error::InternalError::from_response(err, response).into()
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub fn render_alert(outcome: &Outcome) -> String {
    match outcome {
        Ok(prediction) => format!(
            r#"<div class="alert alert-info" role="alert">Predicted Grade Class: {}</div>"#,
            escape(prediction.label())
        ),
        Err(e) => format!(
            r#"<div class="alert alert-danger" role="alert">Error: {}</div>"#,
            escape(&e.to_string())
        ),
    }
}

pub fn render_page(form: &PredictionForm, outcome: Option<&Outcome>) -> String {
    let result = outcome.map(render_alert).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>BrightPath Academy - Predict Grade Class</title>
    <style>
        body {{ font-family: Arial, sans-serif; max-width: 900px; margin: 0 auto; padding: 20px; }}
        .card-container {{ background: #f5f5f5; padding: 25px; border-radius: 10px; }}
        .form-row {{ display: flex; flex-wrap: wrap; gap: 20px; margin-bottom: 15px; }}
        .form-row > div {{ flex: 1; min-width: 160px; }}
        label {{ display: block; margin-bottom: 5px; font-weight: bold; }}
        .alert {{ margin-top: 20px; padding: 15px; border-radius: 5px; }}
        .alert-info {{ background: #d1ecf1; color: #0c5460; border: 1px solid #bee5eb; }}
        .alert-danger {{ background: #f8d7da; color: #721c24; border: 1px solid #f5c6cb; }}
    </style>
</head>
<body>
    <header class="site-header">
        <h1 class="header-title">BrightPath Academy</h1>
        <p class="header-tagline">Empowering Every Learner’s Journey</p>
    </header>

    <section class="section-container">
        <div class="card-container">
            <h2 class="section-title">Predict Grade Class</h2>
            <form id="predict-form" method="post" action="/">
                <div class="form-row">
                    <div>
                        <label for="study-time">Study Time (Weekly Hours)</label>
                        <input type="number" id="study-time" name="study_time" min="0" max="20" step="any" required value="{study_time}">
                    </div>
                    <div>
                        <label for="absences">Absences</label>
                        <input type="number" id="absences" name="absences" min="0" max="30" step="any" required value="{absences}">
                    </div>
                    <div>
                        <label>Tutoring Status</label>
                        {tutoring}
                    </div>
                </div>
                <div class="form-row">
                    <div>
                        <label for="parental-involvement">Parental Involvement</label>
                        {parental}
                    </div>
                    <div>
                        <label>Extracurricular Activities?</label>
                        {extracurricular}
                    </div>
                    <div>
                        <label>Participating in Sports?</label>
                        {sport}
                    </div>
                    <div>
                        <label>Participating in Music?</label>
                        {music}
                    </div>
                </div>
                <button type="submit" id="predict-btn" class="submit-button">Predict GradeClass</button>
            </form>

            <div id="prediction-result" class="alert-box">{result}</div>
        </div>
    </section>

    <footer class="site-footer">
        <p>© 2025 BrightPath Academy. All rights reserved.</p>
        <p>Contact us: info@brightpath.academy | +1 (555) 123-4567</p>
    </footer>

    <script>
        document.addEventListener("DOMContentLoaded", () => {{
            const form = document.getElementById("predict-form");
            const submitBtn = document.querySelector(".submit-button");
            form.addEventListener("submit", () => {{
                submitBtn.disabled = true;
                submitBtn.textContent = "Predicting...";
            }});
        }});
    </script>
</body>
</html>
"#,
        study_time = escape(form.study_time.as_deref().unwrap_or("")),
        absences = escape(form.absences.as_deref().unwrap_or("")),
        tutoring = yes_no_radios("tutoring", form.tutoring.as_deref()),
        parental = parental_select(form.parental_involvement.as_deref()),
        extracurricular = yes_no_radios("extracurricular", form.extracurricular.as_deref()),
        sport = yes_no_radios("sport", form.sport.as_deref()),
        music = yes_no_radios("music", form.music.as_deref()),
        result = result,
    )
}

fn yes_no_radios(name: &str, selected: Option<&str>) -> String {
    ["Yes", "No"]
        .iter()
        .map(|option| {
            let checked = if selected == Some(*option) { " checked" } else { "" };
            format!(
                r#"<label class="radio-inline"><input type="radio" name="{name}" value="{option}"{checked}> {option}</label>"#
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn parental_select(selected: Option<&str>) -> String {
    let selected = selected.map(str::trim);
    let placeholder = if selected.map_or(true, str::is_empty) { " selected" } else { "" };

    let mut options = vec![format!(r#"<option value=""{placeholder}>Select level</option>"#)];
    for level in ParentalInvolvement::ALL {
        let code = level.code().to_string();
        let mark = if selected == Some(code.as_str()) { " selected" } else { "" };
        options.push(format!(
            r#"<option value="{code}"{mark}>{}</option>"#,
            level.label()
        ));
    }

    format!(
        r#"<select id="parental-involvement" name="parental_involvement">{}</select>"#,
        options.join("")
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
