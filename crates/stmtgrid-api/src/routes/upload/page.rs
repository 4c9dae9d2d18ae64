//! Upload panel rendering - file tab, scan tab and the camera script

use stmtgrid_core::status::CAMERA_DENIED_ERROR;
use stmtgrid_core::Status;
use stmtgrid_extract::{CAPTURE_CONTENT_TYPE, CAPTURE_FILE_NAME};

/// JPEG quality for frames grabbed from the preview
const CAPTURE_QUALITY: f64 = 0.9;

/// Tabs with the upload form and the camera form
///
/// Both forms post to `/upload`; while a request is in flight the loader
/// shows and both submit buttons are disabled.
pub fn render_upload_panel() -> String {
    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <div class='flex gap-2 border-b mb-4'>
                <button type='button' class='tab-btn px-4 py-2 -mb-px border-b-2 border-indigo-600 text-indigo-600' data-tab='upload' onclick='switchTab("upload")'>Upload File</button>
                <button type='button' class='tab-btn px-4 py-2 -mb-px border-b-2 border-transparent text-gray-600' data-tab='scan' onclick='switchTab("scan")'>Scan with Camera</button>
            </div>

            <div id='tab-upload' class='tab-panel'>
                <form id='upload-form' hx-post='/upload' hx-encoding='multipart/form-data' hx-target='#status'
                    hx-indicator='#loader' hx-disabled-elt='#upload-btn, #process-capture-btn'
                    class='flex items-center gap-3'>
                    <input type='file' id='file-input' name='file' accept='application/pdf,image/*'
                        class='flex-1 text-sm border rounded-lg p-2'>
                    <button type='submit' id='upload-btn' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 disabled:opacity-50'>Upload &amp; Extract</button>
                </form>
            </div>

            <div id='tab-scan' class='tab-panel hidden'>
                <form id='capture-form' hx-post='/upload' hx-encoding='multipart/form-data' hx-target='#status'
                    hx-indicator='#loader' hx-disabled-elt='#upload-btn, #process-capture-btn'>
                    <input type='file' id='capture-input' name='file' class='hidden'>
                    <input type='hidden' name='source' value='camera'>
                    <div class='grid grid-cols-1 md:grid-cols-2 gap-4 mb-3'>
                        <video id='camera-preview' autoplay playsinline muted class='w-full rounded-lg bg-gray-900 hidden'></video>
                        <img id='capture-preview' alt='Captured frame' class='w-full rounded-lg border hidden'>
                    </div>
                    <canvas id='capture-canvas' class='hidden'></canvas>
                    <div class='flex gap-2'>
                        <button type='button' id='camera-btn' onclick='toggleCamera()' class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200'>Start Camera</button>
                        <button type='button' id='capture-btn' onclick='captureFrame()' disabled class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200 disabled:opacity-50'>Capture</button>
                        <button type='submit' id='process-capture-btn' disabled class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 disabled:opacity-50'>Process Capture</button>
                    </div>
                </form>
            </div>

            <div id='loader' class='htmx-indicator items-center gap-2 mt-4 text-sm text-gray-600'>
                <span class='inline-block h-4 w-4 rounded-full border-2 border-indigo-600 border-t-transparent animate-spin'></span>
                <span>Extracting transactions...</span>
            </div>
        </div>
        <script>{}</script>"#,
        upload_script()
    )
}

/// Camera control, tab switching and status plumbing for the upload panel
fn upload_script() -> String {
    format!(
        r#"
        const CAMERA_MESSAGES = {camera_messages};
        const CAMERA_UNAVAILABLE = {unavailable};
        let cameraStream = null;

        function setStatus(kind, message) {{
            const el = document.createElement('div');
            el.className = 'border rounded-lg px-4 py-3 ' + ({{
                info: 'bg-blue-50 border-blue-200 text-blue-800',
                success: 'bg-green-50 border-green-200 text-green-800',
                error: 'bg-red-50 border-red-200 text-red-800'
            }})[kind];
            el.setAttribute('role', 'status');
            el.dataset.status = kind;
            el.textContent = message;
            document.getElementById('status').replaceChildren(el);
        }}

        function switchTab(name) {{
            document.querySelectorAll('.tab-panel').forEach(p => p.classList.toggle('hidden', p.id !== 'tab-' + name));
            document.querySelectorAll('.tab-btn').forEach(b => {{
                const active = b.dataset.tab === name;
                b.classList.toggle('border-indigo-600', active);
                b.classList.toggle('text-indigo-600', active);
                b.classList.toggle('border-transparent', !active);
                b.classList.toggle('text-gray-600', !active);
            }});
            if (name !== 'scan') stopCamera();
        }}

        async function toggleCamera() {{
            if (cameraStream) {{
                stopCamera();
                return;
            }}
            try {{
                cameraStream = await navigator.mediaDevices.getUserMedia({{ video: {{ facingMode: 'environment' }} }});
                const video = document.getElementById('camera-preview');
                video.srcObject = cameraStream;
                video.classList.remove('hidden');
                document.getElementById('capture-btn').disabled = false;
                document.getElementById('camera-btn').textContent = 'Stop Camera';
            }} catch (err) {{
                cameraStream = null;
                setStatus('error', (err && CAMERA_MESSAGES[err.name]) || CAMERA_UNAVAILABLE);
            }}
        }}

        function stopCamera() {{
            if (cameraStream) {{
                cameraStream.getTracks().forEach(t => t.stop());
                cameraStream = null;
            }}
            const video = document.getElementById('camera-preview');
            if (video) {{
                video.srcObject = null;
                video.classList.add('hidden');
            }}
            const captureBtn = document.getElementById('capture-btn');
            if (captureBtn) captureBtn.disabled = true;
            const cameraBtn = document.getElementById('camera-btn');
            if (cameraBtn) cameraBtn.textContent = 'Start Camera';
        }}

        function captureFrame() {{
            const video = document.getElementById('camera-preview');
            const canvas = document.getElementById('capture-canvas');
            canvas.width = video.videoWidth;
            canvas.height = video.videoHeight;
            canvas.getContext('2d').drawImage(video, 0, 0, canvas.width, canvas.height);
            canvas.toBlob(blob => {{
                if (!blob) return;
                const file = new File([blob], {file_name}, {{ type: {content_type} }});
                const transfer = new DataTransfer();
                transfer.items.add(file);
                document.getElementById('capture-input').files = transfer.files;
                const preview = document.getElementById('capture-preview');
                preview.src = URL.createObjectURL(blob);
                preview.classList.remove('hidden');
                document.getElementById('process-capture-btn').disabled = false;
            }}, {content_type}, {quality});
        }}

        function exportCsv() {{
            const params = new URLSearchParams();
            document.querySelectorAll('[data-grid-param]').forEach(el => {{
                if (el.value) params.append(el.name, el.value);
            }});
            window.location.href = '/export.csv' + (params.toString() ? '?' + params.toString() : '');
        }}

        document.addEventListener('htmx:beforeRequest', function(e) {{
            const form = e.detail.elt;
            if (!form || (form.id !== 'upload-form' && form.id !== 'capture-form')) return;
            const input = form.querySelector('input[type=file]');
            if (input && input.files.length > 0) {{
                setStatus('info', 'Processing ' + input.files[0].name + '...');
            }}
        }});

        function resetUploadInputs() {{
            document.getElementById('file-input').value = '';
            document.getElementById('capture-input').value = '';
            const preview = document.getElementById('capture-preview');
            preview.classList.add('hidden');
            preview.removeAttribute('src');
            document.getElementById('process-capture-btn').disabled = true;
        }}

        document.addEventListener('htmx:afterRequest', function(e) {{
            const form = e.detail.elt;
            if (!form || (form.id !== 'upload-form' && form.id !== 'capture-form')) return;
            // htmx re-enables hx-disabled-elt after this event
            setTimeout(resetUploadInputs, 0);
        }});

        document.addEventListener('htmx:responseError', function(e) {{
            let message = {unknown};
            try {{
                const body = JSON.parse(e.detail.xhr.responseText);
                if (body && body.detail) message = body.detail;
            }} catch (_) {{}}
            setStatus('error', 'Error: ' + message);
        }});
    "#,
        camera_messages = camera_messages(),
        unavailable = js_string(&Status::camera_failure("").message),
        file_name = js_string(CAPTURE_FILE_NAME),
        content_type = js_string(CAPTURE_CONTENT_TYPE),
        quality = CAPTURE_QUALITY,
        unknown = js_string(stmtgrid_extract::error::UNKNOWN_ERROR),
    )
}

/// Camera failure texts keyed by `DOMException` name, as a JavaScript object
fn camera_messages() -> String {
    let mut messages = serde_json::Map::new();
    messages.insert(
        CAMERA_DENIED_ERROR.to_string(),
        serde_json::Value::String(Status::camera_failure(CAMERA_DENIED_ERROR).message),
    );
    serde_json::Value::Object(messages).to_string()
}

/// Quote a string as a JavaScript literal
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}
