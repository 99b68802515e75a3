//! Scoped ownership of native allocations.
//!
//! Each guard pairs a pointer returned by the native library with the function
//! that frees it and calls that function exactly once when dropped, on every
//! exit path including unwinding. Null pointers are held without being freed.

use std::ffi::CStr;
use std::marker::PhantomData;
use std::os::raw::c_char;
use std::ptr;

use crate::ffi::GList;

/// Function that releases a native allocation.
pub type Release<T> = unsafe fn(*mut T);

/// An owned `GList` whose nodes point at native structs.
pub struct NativeList {
    head: *mut GList,
    release: Release<GList>,
}

impl NativeList {
    /// Take ownership of a list returned by the native library.
    ///
    /// # Safety
    ///
    /// `head` must be null or a valid list that `release` frees, and nothing
    /// else may free it.
    pub unsafe fn new(head: *mut GList, release: Release<GList>) -> Self {
        Self { head, release }
    }

    /// Check if the native call returned no list.
    pub fn is_null(&self) -> bool {
        self.head.is_null()
    }

    /// Walk the list front to back, yielding each non-null `data` as `&T`.
    ///
    /// # Safety
    ///
    /// Every non-null `data` pointer in the list must point at a valid `T`.
    pub unsafe fn iter<T>(&self) -> ListIter<'_, T> {
        ListIter {
            node: self.head,
            _marker: PhantomData,
        }
    }
}

impl Drop for NativeList {
    fn drop(&mut self) {
        if !self.head.is_null() {
            unsafe { (self.release)(self.head) };
            self.head = ptr::null_mut();
        }
    }
}

/// Iterator over the payloads of a borrowed [`NativeList`].
pub struct ListIter<'a, T> {
    node: *const GList,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Iterator for ListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        while !self.node.is_null() {
            // SAFETY: guaranteed by `NativeList::iter`'s contract.
            let node = unsafe { &*self.node };
            self.node = node.next;
            if let Some(data) = unsafe { (node.data as *const T).as_ref() } {
                return Some(data);
            }
        }
        None
    }
}

/// An owned native array of `len` elements.
pub struct NativeArray<T> {
    ptr: *mut T,
    len: usize,
    release: Release<T>,
}

impl<T> NativeArray<T> {
    /// Take ownership of an array returned by the native library.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point at `len` initialized elements that
    /// `release` frees.
    pub unsafe fn new(ptr: *mut T, len: usize, release: Release<T>) -> Self {
        Self { ptr, len, release }
    }

    /// View the elements. A null array is empty.
    pub fn as_slice(&self) -> &[T] {
        if self.ptr.is_null() {
            &[]
        } else {
            unsafe { std::slice::from_raw_parts(self.ptr, self.len) }
        }
    }
}

impl<T> Drop for NativeArray<T> {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            unsafe { (self.release)(self.ptr) };
            self.ptr = ptr::null_mut();
        }
    }
}

/// An owned NUL-terminated native string.
pub struct NativeString {
    ptr: *mut c_char,
    release: Release<c_char>,
}

impl NativeString {
    /// Take ownership of a string returned by the native library.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a valid NUL-terminated string that `release` frees.
    pub unsafe fn new(ptr: *mut c_char, release: Release<c_char>) -> Self {
        Self { ptr, release }
    }

    /// The raw pointer, still owned by this guard.
    pub fn as_ptr(&self) -> *const c_char {
        self.ptr
    }

    /// Copy the contents, replacing invalid UTF-8. `None` for a null string.
    pub fn to_string_lossy(&self) -> Option<String> {
        unsafe { borrowed_string(self.ptr) }
    }
}

impl Drop for NativeString {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            unsafe { (self.release)(self.ptr) };
            self.ptr = ptr::null_mut();
        }
    }
}

/// Copy a string the native library still owns.
///
/// # Safety
///
/// `ptr` must be null or a valid NUL-terminated string.
pub unsafe fn borrowed_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Rust-allocated stand-ins for native lists, with release counting.

    use super::*;
    use std::cell::Cell;
    use std::ffi::CString;

    thread_local! {
        static RELEASED: Cell<usize> = const { Cell::new(0) };
    }

    /// Number of release calls made on this thread so far.
    pub fn released() -> usize {
        RELEASED.with(Cell::get)
    }

    fn count_release() {
        RELEASED.with(|c| c.set(c.get() + 1));
    }

    /// Build a `GList` over boxed payloads. Free with [`release_list::<T>`].
    pub fn build_list<T>(items: Vec<T>) -> *mut GList {
        let mut head: *mut GList = ptr::null_mut();
        for item in items.into_iter().rev() {
            let node = Box::into_raw(Box::new(GList {
                data: Box::into_raw(Box::new(item)).cast(),
                next: head,
                prev: ptr::null_mut(),
            }));
            if !head.is_null() {
                unsafe { (*head).prev = node };
            }
            head = node;
        }
        head
    }

    /// Release a list built by [`build_list`].
    pub unsafe fn release_list<T>(head: *mut GList) {
        count_release();
        let mut node = head;
        while !node.is_null() {
            let boxed = Box::from_raw(node);
            if !boxed.data.is_null() {
                drop(Box::from_raw(boxed.data as *mut T));
            }
            node = boxed.next;
        }
    }

    /// Leak a vector as a native-style array. Free with [`release_array`].
    pub fn build_array<T>(items: Vec<T>) -> (*mut T, usize) {
        let boxed = items.into_boxed_slice();
        let len = boxed.len();
        (Box::into_raw(boxed) as *mut T, len)
    }

    thread_local! {
        static ARRAY_LEN: Cell<usize> = const { Cell::new(0) };
    }

    /// Remember the length of the next array to release.
    pub fn expect_array_len(len: usize) {
        ARRAY_LEN.with(|c| c.set(len));
    }

    /// Release an array built by [`build_array`].
    pub unsafe fn release_array<T>(ptr: *mut T) {
        count_release();
        let len = ARRAY_LEN.with(Cell::get);
        drop(Box::from_raw(ptr::slice_from_raw_parts_mut(ptr, len)));
    }

    /// Leak a C string. Free with [`release_string`].
    pub fn build_string(s: &str) -> *mut c_char {
        CString::new(s).map(CString::into_raw).unwrap_or(ptr::null_mut())
    }

    /// Release a string built by [`build_string`].
    pub unsafe fn release_string(ptr: *mut c_char) {
        count_release();
        drop(CString::from_raw(ptr));
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_list_released_once() {
        let before = released();
        {
            let list = unsafe { NativeList::new(build_list(vec![1u32, 2, 3]), release_list::<u32>) };
            let values: Vec<u32> = unsafe { list.iter::<u32>() }.copied().collect();
            assert_eq!(values, vec![1, 2, 3]);
        }
        assert_eq!(released(), before + 1);
    }

    #[test]
    fn test_null_list_not_released() {
        let before = released();
        {
            let list = unsafe { NativeList::new(ptr::null_mut(), release_list::<u32>) };
            assert!(list.is_null());
            assert_eq!(unsafe { list.iter::<u32>() }.count(), 0);
        }
        assert_eq!(released(), before);
    }

    #[test]
    fn test_list_released_on_unwind() {
        let before = released();
        let result = std::panic::catch_unwind(|| {
            let list = unsafe { NativeList::new(build_list(vec![7u8]), release_list::<u8>) };
            let first = unsafe { list.iter::<u8>() }.next().copied();
            if first == Some(7) {
                panic!("early exit");
            }
        });
        assert!(result.is_err());
        assert_eq!(released(), before + 1);
    }

    #[test]
    fn test_list_skips_null_data() {
        let head = build_list(vec![5i32, 6]);
        // Blank out the first payload the way a sparse native list would look.
        let first = unsafe { Box::from_raw((*head).data as *mut i32) };
        drop(first);
        unsafe { (*head).data = ptr::null_mut() };

        let list = unsafe { NativeList::new(head, release_list::<i32>) };
        let values: Vec<i32> = unsafe { list.iter::<i32>() }.copied().collect();
        assert_eq!(values, vec![6]);
    }

    #[test]
    fn test_array_and_string() {
        let before = released();
        {
            let (ptr, len) = build_array(vec![1.5f64, 2.5]);
            expect_array_len(len);
            let array = unsafe { NativeArray::new(ptr, len, release_array::<f64>) };
            assert_eq!(array.as_slice(), &[1.5, 2.5]);

            let s = unsafe { NativeString::new(build_string("Page iv"), release_string) };
            assert_eq!(s.to_string_lossy().as_deref(), Some("Page iv"));
        }
        assert_eq!(released(), before + 2);

        let empty = unsafe { NativeArray::<f64>::new(ptr::null_mut(), 4, release_array::<f64>) };
        assert!(empty.as_slice().is_empty());
        let none = unsafe { NativeString::new(ptr::null_mut(), release_string) };
        assert_eq!(none.to_string_lossy(), None);
    }
}
