//! Win32 backend for [`WindowSystem`].
//!
//! user32 calls go through `winapi`; process handles through `windows`;
//! the process table comes from `sysinfo`.

use crate::e_types::{DockRect, ProcessDescriptor, WindowHandle};
use crate::e_window_system::WindowSystem;
use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;
use sysinfo::{ProcessesToUpdate, System};
use winapi::shared::minwindef::{BOOL, DWORD, LPARAM, TRUE};
use winapi::shared::windef::{HWND, RECT};
use winapi::um::errhandlingapi::{GetLastError, SetLastError};
use winapi::um::winuser::{
    EnumWindows, GetClassNameW, GetClientRect, GetWindow, GetWindowLongW,
    GetWindowThreadProcessId, IsWindow, IsWindowVisible, SetParent, SetWindowLongW, SetWindowPos,
    GWL_STYLE, GW_OWNER,
};
use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::Threading::{OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_VM_READ};

/// Class names longer than this are truncated by `GetClassNameW`.
const CLASS_NAME_CAPACITY: usize = 256;

#[derive(Debug, Default, Clone, Copy)]
pub struct Win32WindowSystem;

impl Win32WindowSystem {
    pub fn new() -> Self {
        Self
    }
}

fn as_hwnd(w: WindowHandle) -> HWND {
    w.raw() as HWND
}

/// Runs a Win32 setter whose zero return is ambiguous; the last-error
/// code decides whether it failed.
unsafe fn checked<T: PartialEq + Default>(
    call: &str,
    w: WindowHandle,
    f: impl FnOnce() -> T,
) -> Result<T> {
    SetLastError(0);
    let result = f();
    if result == T::default() {
        let code = GetLastError();
        if code != 0 {
            bail!("{} failed for {} (error {})", call, w, code);
        }
    }
    Ok(result)
}

unsafe extern "system" fn collect_main_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let found = &mut *(lparam as *mut HashMap<u32, WindowHandle>);
    // Same rule as a process's "main window": visible and not owned.
    if IsWindowVisible(hwnd) == 0 || !GetWindow(hwnd, GW_OWNER).is_null() {
        return TRUE;
    }
    let mut pid: DWORD = 0;
    GetWindowThreadProcessId(hwnd, &mut pid);
    if pid != 0 {
        found.entry(pid).or_insert(WindowHandle(hwnd as usize));
    }
    TRUE
}

/// First visible, unowned top-level window per pid.
fn main_windows() -> HashMap<u32, WindowHandle> {
    let mut found: HashMap<u32, WindowHandle> = HashMap::new();
    unsafe {
        EnumWindows(Some(collect_main_window), &mut found as *mut _ as LPARAM);
    }
    found
}

/// An open process handle, closed on drop.
struct ProcessAccess(HANDLE);

impl ProcessAccess {
    fn open(pid: u32) -> Result<Self> {
        let access = PROCESS_QUERY_INFORMATION | PROCESS_VM_READ;
        let handle = unsafe { OpenProcess(access, false, pid) }
            .with_context(|| format!("OpenProcess({})", pid))?;
        if handle.is_invalid() {
            bail!("OpenProcess({}) returned an invalid handle", pid);
        }
        Ok(Self(handle))
    }
}

impl Drop for ProcessAccess {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

impl WindowSystem for Win32WindowSystem {
    fn processes(&self) -> Vec<ProcessDescriptor> {
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::All, true);
        let main = main_windows();
        sys.processes()
            .iter()
            .map(|(pid, process)| {
                let pid = pid.as_u32();
                ProcessDescriptor::new(
                    pid,
                    process.name().to_string_lossy(),
                    main.get(&pid).copied().unwrap_or(WindowHandle::NULL),
                )
            })
            .collect()
    }

    fn is_live(&self, w: WindowHandle) -> bool {
        !w.is_null() && unsafe { IsWindow(as_hwnd(w)) } != 0
    }

    fn class_name(&self, w: WindowHandle) -> Option<String> {
        if w.is_null() {
            return None;
        }
        let mut buf = [0u16; CLASS_NAME_CAPACITY];
        let len = unsafe { GetClassNameW(as_hwnd(w), buf.as_mut_ptr(), buf.len() as i32) };
        if len <= 0 {
            return None;
        }
        Some(
            OsString::from_wide(&buf[..len as usize])
                .to_string_lossy()
                .into_owned(),
        )
    }

    fn style(&self, w: WindowHandle) -> Result<u32> {
        let style =
            unsafe { checked("GetWindowLongW", w, || GetWindowLongW(as_hwnd(w), GWL_STYLE))? };
        Ok(style as u32)
    }

    fn set_style(&self, w: WindowHandle, style: u32) -> Result<()> {
        unsafe {
            checked("SetWindowLongW", w, || {
                SetWindowLongW(as_hwnd(w), GWL_STYLE, style as i32)
            })?;
        }
        Ok(())
    }

    fn set_parent(&self, child: WindowHandle, new_parent: WindowHandle) -> Result<()> {
        unsafe {
            checked("SetParent", child, || {
                SetParent(as_hwnd(child), as_hwnd(new_parent)) as usize
            })?;
        }
        Ok(())
    }

    fn set_position(&self, w: WindowHandle, rect: DockRect, flags: u32) -> Result<()> {
        let ok = unsafe {
            SetWindowPos(
                as_hwnd(w),
                std::ptr::null_mut(),
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                flags,
            )
        };
        if ok == 0 {
            let code = unsafe { GetLastError() };
            bail!("SetWindowPos failed for {} (error {})", w, code);
        }
        Ok(())
    }

    fn owning_process(&self, w: WindowHandle) -> Option<u32> {
        if !self.is_live(w) {
            return None;
        }
        let mut pid: DWORD = 0;
        unsafe { GetWindowThreadProcessId(as_hwnd(w), &mut pid) };
        if pid == 0 {
            return None;
        }
        match ProcessAccess::open(pid) {
            Ok(_access) => Some(pid),
            Err(e) => {
                log::debug!("{} belongs to pid {} but: {:#}", w, pid, e);
                None
            }
        }
    }

    fn client_rect(&self, w: WindowHandle) -> Option<DockRect> {
        let mut rect: RECT = unsafe { std::mem::zeroed() };
        if unsafe { GetClientRect(as_hwnd(w), &mut rect) } == 0 {
            return None;
        }
        Some(DockRect::new(
            rect.left,
            rect.top,
            rect.right - rect.left,
            rect.bottom - rect.top,
        ))
    }

    fn main_window_of(&self, pid: u32) -> Option<WindowHandle> {
        main_windows().get(&pid).copied()
    }
}
