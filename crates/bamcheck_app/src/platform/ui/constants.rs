pub const SELECT_LABEL: &str = "Select files";
pub const CONFIRM_LABEL: &str = "Confirm upload";
pub const CLEAR_LABEL: &str = "Clear";

pub const COLOR_NORMAL: &str = "black";
pub const COLOR_ERROR: &str = "red";
pub const PROGRESS_TRACK: &str = "#EEEEEE";

pub const STYLES: &str = r#"
body { font-family: sans-serif; margin: 0; }
.bc-shell {
    display: flex;
    flex-direction: column;
    align-items: center;
    justify-content: center;
    gap: 10px;
    min-height: 100vh;
}
.bc-button {
    width: 250px;
    height: 75px;
    border-radius: 5px;
    display: flex;
    align-items: center;
    justify-content: center;
    cursor: pointer;
}
.bc-file-input { display: none; }
.bc-files { display: flex; flex-direction: column; gap: 4px; }
.bc-file-row { display: flex; align-items: center; justify-content: center; gap: 8px; }
.bc-progress { width: 60px; height: 10px; }
.bc-status { margin: 0; }
"#;
