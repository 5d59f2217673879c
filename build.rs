use std::process::Command;

fn main() {
    // Only rebuild CSS when template, script or CSS files change
    println!("cargo:rerun-if-changed=assets/css/input.css");
    println!("cargo:rerun-if-changed=assets/js/");
    println!("cargo:rerun-if-changed=templates/");

    let status = Command::new("tailwindcss")
        .args([
            "-i",
            "assets/css/input.css",
            "-o",
            "assets/css/output.css",
            "--minify",
        ])
        .status();

    match status {
        Ok(s) if s.success() => {
            println!("cargo:warning=Tailwind CSS compiled successfully");
        }
        _ => {
            // Tailwind CLI not available: write a hand-rolled stylesheet
            // covering the classes the templates use.
            println!("cargo:warning=Tailwind CLI not found, using fallback CSS");
            let fallback = r#"*, *::before, *::after { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: system-ui, -apple-system, sans-serif; line-height: 1.5; color: #111827; -webkit-font-smoothing: antialiased; }
.bg-portal { background: linear-gradient(to bottom right, #eff6ff, #fff, #f0fdfa); }
.bg-white { background-color: #fff; }
.min-h-screen { min-height: 100vh; }
.hidden { display: none !important; }
.block { display: block; }
.flex { display: flex; }
.grid { display: grid; }
.flex-1 { flex: 1 1 0%; }
.flex-shrink-0 { flex-shrink: 0; }
.items-center { align-items: center; }
.justify-center { justify-content: center; }
.justify-between { justify-content: space-between; }
.gap-3 { gap: 0.75rem; }
.gap-4 { gap: 1rem; }
.gap-6 { gap: 1.5rem; }
.space-y-4 > * + * { margin-top: 1rem; }
.grid-2, .grid-3 { grid-template-columns: 1fr; }
@media (min-width: 768px) { .grid-2, .grid-3 { grid-template-columns: repeat(2, 1fr); } .profile { flex-direction: row; align-items: flex-start; } }
@media (min-width: 1024px) { .grid-3 { grid-template-columns: repeat(3, 1fr); } }
.max-w-7xl { max-width: 80rem; }
.max-w-md { max-width: 28rem; }
.w-full { width: 100%; }
.h-16 { height: 4rem; }
.mx-auto { margin-left: auto; margin-right: auto; }
.px-4 { padding-left: 1rem; padding-right: 1rem; }
.py-8 { padding-top: 2rem; padding-bottom: 2rem; }
.mb-2 { margin-bottom: 0.5rem; }
.mb-4 { margin-bottom: 1rem; }
.mb-6 { margin-bottom: 1.5rem; }
.mb-8 { margin-bottom: 2rem; }
.mt-1 { margin-top: 0.25rem; }
.mt-2 { margin-top: 0.5rem; }
.text-center { text-align: center; }
.text-xs { font-size: 0.75rem; }
.text-sm { font-size: 0.875rem; }
.text-lg { font-size: 1.125rem; }
.text-xl { font-size: 1.25rem; }
.text-2xl { font-size: 1.5rem; }
.text-3xl { font-size: 1.875rem; }
.font-medium { font-weight: 500; }
.font-semibold { font-weight: 600; }
.font-bold { font-weight: 700; }
.font-mono { font-family: ui-monospace, monospace; }
.capitalize { text-transform: capitalize; }
.text-gray-600 { color: #4b5563; }
.text-gray-900 { color: #111827; }
.shadow-sm { box-shadow: 0 1px 2px 0 rgb(0 0 0 / 0.05); }
.border-b { border-bottom: 1px solid; }
.border-gray-200 { border-color: #e5e7eb; }
.card { background: #fff; border-radius: 0.75rem; border: 1px solid #f3f4f6; padding: 2rem; box-shadow: 0 10px 15px -3px rgb(0 0 0 / 0.1); }
.brand-badge { background: #2563eb; color: #fff; border-radius: 0.5rem; width: 2.5rem; height: 2.5rem; display: flex; align-items: center; justify-content: center; }
.btn { display: inline-flex; align-items: center; justify-content: center; padding: 0.5rem 1rem; border-radius: 0.5rem; font-size: 0.875rem; font-weight: 500; cursor: pointer; border: none; }
.btn-primary { background: #2563eb; color: #fff; }
.btn-primary:hover { background: #1d4ed8; }
.btn-secondary { background: #fff; color: #111827; border: 1px solid #d1d5db; }
.btn-link { background: none; color: #4b5563; }
.btn-link:hover { color: #111827; }
.input { margin-top: 0.25rem; display: block; width: 100%; border: 1px solid #d1d5db; border-radius: 0.5rem; padding: 0.5rem 0.75rem; }
.form-error { font-size: 0.875rem; color: #b91c1c; background: #fef2f2; border: 1px solid #fecaca; border-radius: 0.5rem; padding: 0.5rem 0.75rem; }
.notice { font-size: 0.875rem; color: #92400e; background: #fffbeb; border: 1px solid #fde68a; border-radius: 0.5rem; padding: 0.75rem 1rem; }
.profile { display: flex; flex-direction: column; align-items: center; gap: 2rem; }
.photo { position: relative; flex-shrink: 0; display: flex; flex-direction: column; align-items: center; }
.photo-frame { position: relative; display: block; width: 8rem; height: 8rem; cursor: pointer; }
.avatar { width: 8rem; height: 8rem; border-radius: 9999px; object-fit: cover; border: 4px solid #fff; box-shadow: 0 10px 15px -3px rgb(0 0 0 / 0.1); }
.avatar-fallback { width: 8rem; height: 8rem; border-radius: 9999px; background: linear-gradient(to bottom right, #3b82f6, #14b8a6); color: #fff; font-size: 3rem; display: flex; align-items: center; justify-content: center; }
.photo-overlay { position: absolute; inset: 0; border-radius: 9999px; display: flex; align-items: center; justify-content: center; opacity: 0; font-size: 1.5rem; transition: all 0.2s; }
.photo-frame:hover .photo-overlay { opacity: 1; background: rgb(0 0 0 / 0.4); }
.photo-tooltip { margin-top: 0.5rem; font-size: 0.75rem; color: #6b7280; }
.info-card { padding: 1.5rem; display: flex; align-items: center; gap: 0.75rem; }
.info-icon { background: #dbeafe; border-radius: 0.5rem; width: 2.5rem; height: 2.5rem; }
.action { padding: 1rem; text-align: left; border-radius: 0.5rem; border: 1px solid; cursor: pointer; }
.action-blue { background: #eff6ff; border-color: #bfdbfe; color: #1e3a8a; }
.action-teal { background: #f0fdfa; border-color: #99f6e4; color: #134e4a; }
.action-purple { background: #faf5ff; border-color: #e9d5ff; color: #581c87; }
"#;
            std::fs::create_dir_all("assets/css").ok();
            std::fs::write("assets/css/output.css", fallback).ok();
        }
    }
}
