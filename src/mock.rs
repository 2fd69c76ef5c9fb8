use std::{fmt::Debug, sync::Mutex};

/// Records every call and answers with a configurable executor.
pub struct Mock<OUTPUT: Send + Sync, INPUT: Send + Sync = ()>
where
    INPUT: Clone,
{
    executor: Box<dyn Fn(INPUT) -> OUTPUT + Sync + Send>,
    calls: Mutex<Vec<INPUT>>,
}

impl<OUTPUT: Send + Sync, INPUT: Clone + Send + Sync> Default for Mock<OUTPUT, INPUT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<OUTPUT: Send + Sync, INPUT: Clone + Send + Sync> Mock<OUTPUT, INPUT> {
    pub fn new() -> Self {
        Self {
            executor: Box::new(|_| panic!("Mock executor not set")),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(self, output: OUTPUT) -> Self
    where
        OUTPUT: Clone + 'static,
    {
        Self {
            executor: Box::new(move |_| output.clone()),
            calls: self.calls,
        }
    }

    pub fn fake<T>(self, fake: T) -> Self
    where
        T: Fn(INPUT) -> OUTPUT + 'static + Send + Sync,
    {
        Self {
            executor: Box::new(fake),
            calls: self.calls,
        }
    }

    pub fn call(&self, input: INPUT) -> OUTPUT {
        let result = (self.executor)(input.clone());
        self.calls.lock().unwrap().push(input);
        result
    }

    pub fn get_calls(&self) -> Vec<INPUT> {
        self.calls.lock().unwrap().clone()
    }

    pub fn assert_called_times(&self, times: usize) {
        assert_eq!(self.calls.lock().unwrap().len(), times);
    }

    pub fn assert_nth_call(&self, n: usize, input: INPUT)
    where
        INPUT: PartialEq + Debug,
    {
        let call = self.calls.lock().unwrap().get(n).cloned();
        assert_eq!(call, Some(input), "call #{} did not match", n);
    }

    pub fn assert_first_call(&self, input: INPUT)
    where
        INPUT: PartialEq + Debug,
    {
        self.assert_nth_call(0, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_must_return_specified_value() {
        let mock: Mock<i32> = Mock::new().returning(42);
        assert_eq!(mock.call(()), 42);
    }

    #[test]
    fn it_must_call_fake_with_needed_args() {
        let mock: Mock<String, String> = Mock::new().fake(|s: String| s.to_uppercase());
        assert_eq!(mock.call("abc".into()), "ABC");
    }

    #[test]
    fn it_must_record_calls_in_order() {
        let mock: Mock<(), i32> = Mock::new().returning(());
        mock.call(12);
        mock.call(13);
        assert_eq!(mock.get_calls(), vec![12, 13]);
        mock.assert_nth_call(1, 13);
        mock.assert_called_times(2);
    }

    #[test]
    #[should_panic]
    fn it_must_fail_on_a_mismatched_call() {
        let mock: Mock<(), i32> = Mock::new().returning(());
        mock.call(12);
        mock.assert_first_call(99);
    }
}
